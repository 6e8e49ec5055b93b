/// Property-based tests for the bike update merge
///
/// A field present in the update replaces the stored value, an absent field
/// keeps it, and stored ids never change.
use bikeservice::bikes::services::bike_mapper::{merge_into, to_dto, to_entity};
use bikeservice::bikes::{Bike, BikeDto, Customer, CustomerDto};
use proptest::option;
use proptest::prelude::*;
use rust_decimal::Decimal;

fn text() -> impl Strategy<Value = Option<String>> {
    option::of("[A-Za-z0-9 ]{1,16}")
}

fn stored_bike() -> Bike {
    let mut customer = Customer::new("Rahul Sharma", "9123456780");
    customer.customer_id = Some(10);
    customer.city = Some("Mumbai".to_string());
    customer.pin = Some("400001".to_string());

    let mut bike = Bike::new("Honda", "CB350", "KA19MA1234", customer);
    bike.bike_id = Some(1);
    bike.known_issues = Some("Brake pad issue".to_string());
    bike.cost = Some(Decimal::from(145000));
    bike
}

fn pick<T: Clone>(incoming: &Option<T>, stored: &Option<T>) -> Option<T> {
    incoming.clone().or_else(|| stored.clone())
}

proptest! {
    /// Property: merged field = update field if present, stored field otherwise
    #[test]
    fn test_merge_overwrites_only_present_fields(
        bike_make in text(),
        model_name in text(),
        registration in text(),
        known_issues in text(),
        cost in option::of(0u32..10_000_000u32),
        customer_name in text(),
        city in text(),
        with_customer in any::<bool>(),
    ) {
        let stored = stored_bike();
        let update = BikeDto {
            bike_id: Some(999),
            bike_make: bike_make.clone(),
            model_name: model_name.clone(),
            bike_registration_number: registration.clone(),
            known_issues: known_issues.clone(),
            cost: cost.map(Decimal::from),
            customer: with_customer.then(|| CustomerDto {
                customer_id: Some(555),
                customer_name: customer_name.clone(),
                city: city.clone(),
                ..Default::default()
            }),
            ..Default::default()
        };

        let mut merged = stored.clone();
        merge_into(&mut merged, update);

        prop_assert_eq!(merged.bike_id, Some(1));
        prop_assert_eq!(merged.customer.customer_id, Some(10));
        prop_assert_eq!(merged.bike_make, pick(&bike_make, &stored.bike_make));
        prop_assert_eq!(merged.model_name, pick(&model_name, &stored.model_name));
        prop_assert_eq!(
            merged.bike_registration_number,
            pick(&registration, &stored.bike_registration_number)
        );
        prop_assert_eq!(merged.known_issues, pick(&known_issues, &stored.known_issues));
        prop_assert_eq!(merged.cost, pick(&cost.map(Decimal::from), &stored.cost));
        prop_assert_eq!(merged.bike_chassis_number, stored.bike_chassis_number);

        if with_customer {
            prop_assert_eq!(
                merged.customer.customer_name,
                pick(&customer_name, &stored.customer.customer_name)
            );
            prop_assert_eq!(merged.customer.city, pick(&city, &stored.customer.city));
        } else {
            prop_assert_eq!(merged.customer.customer_name, stored.customer.customer_name);
            prop_assert_eq!(merged.customer.city, stored.customer.city);
        }
        prop_assert_eq!(merged.customer.phone_number, stored.customer.phone_number);
        prop_assert_eq!(merged.customer.pin, stored.customer.pin);
    }

    /// Property: an empty update leaves the bike untouched
    #[test]
    fn test_empty_update_is_identity(with_empty_customer in any::<bool>()) {
        let stored = stored_bike();
        let update = BikeDto {
            customer: with_empty_customer.then(CustomerDto::default),
            ..Default::default()
        };

        let mut merged = stored.clone();
        merge_into(&mut merged, update);

        prop_assert_eq!(merged, stored);
    }

    /// Property: a created entity never carries client-supplied ids
    #[test]
    fn test_to_entity_strips_ids(
        bike_id in option::of(any::<i64>()),
        customer_id in option::of(any::<i64>()),
        bike_make in text(),
    ) {
        let bike = to_entity(BikeDto {
            bike_id,
            bike_make: bike_make.clone(),
            customer: Some(CustomerDto {
                customer_id,
                ..Default::default()
            }),
            ..Default::default()
        });

        prop_assert_eq!(bike.bike_id, None);
        prop_assert_eq!(bike.customer.customer_id, None);
        prop_assert_eq!(bike.bike_make, bike_make);
    }
}

#[test]
fn test_to_dto_then_to_entity_keeps_content() {
    let stored = stored_bike();

    let rebuilt = to_entity(to_dto(&stored));

    let mut expected = stored.clone();
    expected.bike_id = None;
    expected.customer.customer_id = None;
    assert_eq!(rebuilt, expected);
}
