// Conversions between the HTTP shapes and the persisted records.
//
// Create copies every DTO field into a fresh entity. Update is a
// field-level merge: a field carried by the DTO replaces the stored value,
// an absent field leaves it alone. The nested customer follows the same
// rule. IDs coming from the DTO are never applied.

use crate::modules::bikes::models::{Bike, BikeDto, Customer, CustomerDto};

/// Build a new, not yet persisted bike from a create request
pub fn to_entity(dto: BikeDto) -> Bike {
    Bike {
        bike_id: None,
        bike_make: dto.bike_make,
        model_name: dto.model_name,
        bike_registration_number: dto.bike_registration_number,
        bike_chassis_number: dto.bike_chassis_number,
        known_issues: dto.known_issues,
        cost: dto.cost,
        created_date_and_time: dto.created_date_and_time,
        expected_delivery_date: dto.expected_delivery_date,
        given_date: dto.given_date,
        updated_date_and_time: dto.updated_date_and_time,
        customer: dto.customer.map(to_customer).unwrap_or_default(),
    }
}

fn to_customer(dto: CustomerDto) -> Customer {
    Customer {
        customer_id: None,
        customer_name: dto.customer_name,
        phone_number: dto.phone_number,
        house_no: dto.house_no,
        street: dto.street,
        landmark: dto.landmark,
        city: dto.city,
        state: dto.state,
        pin: dto.pin,
    }
}

pub fn to_dto(bike: &Bike) -> BikeDto {
    BikeDto {
        bike_id: bike.bike_id,
        bike_make: bike.bike_make.clone(),
        model_name: bike.model_name.clone(),
        bike_registration_number: bike.bike_registration_number.clone(),
        bike_chassis_number: bike.bike_chassis_number.clone(),
        known_issues: bike.known_issues.clone(),
        cost: bike.cost,
        created_date_and_time: bike.created_date_and_time,
        expected_delivery_date: bike.expected_delivery_date,
        given_date: bike.given_date,
        updated_date_and_time: bike.updated_date_and_time,
        customer: Some(customer_to_dto(&bike.customer)),
    }
}

fn customer_to_dto(customer: &Customer) -> CustomerDto {
    CustomerDto {
        customer_id: customer.customer_id,
        customer_name: customer.customer_name.clone(),
        phone_number: customer.phone_number.clone(),
        house_no: customer.house_no.clone(),
        street: customer.street.clone(),
        landmark: customer.landmark.clone(),
        city: customer.city.clone(),
        state: customer.state.clone(),
        pin: customer.pin.clone(),
    }
}

/// Merge an update request into the stored bike
pub fn merge_into(bike: &mut Bike, dto: BikeDto) {
    overwrite(&mut bike.bike_make, dto.bike_make);
    overwrite(&mut bike.model_name, dto.model_name);
    overwrite(&mut bike.bike_registration_number, dto.bike_registration_number);
    overwrite(&mut bike.bike_chassis_number, dto.bike_chassis_number);
    overwrite(&mut bike.known_issues, dto.known_issues);
    overwrite(&mut bike.cost, dto.cost);
    overwrite(&mut bike.created_date_and_time, dto.created_date_and_time);
    overwrite(&mut bike.expected_delivery_date, dto.expected_delivery_date);
    overwrite(&mut bike.given_date, dto.given_date);
    overwrite(&mut bike.updated_date_and_time, dto.updated_date_and_time);

    if let Some(customer) = dto.customer {
        merge_customer(&mut bike.customer, customer);
    }
}

fn merge_customer(customer: &mut Customer, dto: CustomerDto) {
    overwrite(&mut customer.customer_name, dto.customer_name);
    overwrite(&mut customer.phone_number, dto.phone_number);
    overwrite(&mut customer.house_no, dto.house_no);
    overwrite(&mut customer.street, dto.street);
    overwrite(&mut customer.landmark, dto.landmark);
    overwrite(&mut customer.city, dto.city);
    overwrite(&mut customer.state, dto.state);
    overwrite(&mut customer.pin, dto.pin);
}

#[inline]
fn overwrite<T>(slot: &mut Option<T>, incoming: Option<T>) {
    if incoming.is_some() {
        *slot = incoming;
    }
}
