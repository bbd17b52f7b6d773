//! Wire types for the Zando API.
//!
//! Field names follow the API's JSON casing exactly (PascalCase with `ID`
//! suffixes), so these types round-trip the payloads untouched.

use serde::{Deserialize, Serialize};

/// A scheduled fitness class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct FitnessClass {
    #[serde(rename = "ClassID")]
    pub class_id: i64,
    pub class_name: String,
    pub description: String,
    pub class_type: String,
    /// Duration in minutes.
    pub duration: i64,
    pub max_participants: i64,
    #[serde(rename = "EmployeeID")]
    pub employee_id: i64,
    #[serde(rename = "CenterID")]
    pub center_id: i64,
    /// Calendar date of the class, ISO `yyyy-mm-dd`.
    pub schedule_date: String,
    pub start_time: String,
    pub end_time: String,
}

/// A membership tier offered at registration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Membership {
    #[serde(rename = "MembershipID")]
    pub membership_id: i64,
    pub membership_name: String,
    pub price_per_month: String,
    pub access_level: String,
    pub duration: String,
    pub max_class_bookings: i64,
    pub description: String,
}

/// Personal details shared by members and employees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Person {
    #[serde(rename = "PersonID")]
    pub person_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub date_of_birth: String,
    pub role: String,
    pub image_url: Option<String>,
}

/// A gym member with their person record and bookings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Member {
    #[serde(rename = "MemberID")]
    pub member_id: i64,
    #[serde(rename = "PersonID")]
    pub person_id: i64,
    #[serde(rename = "MembershipID")]
    pub membership_id: Option<i64>,
    #[serde(rename = "JoinDate")]
    pub join_date: String,
    #[serde(rename = "EmergencyContact")]
    pub emergency_contact: String,
    // Nested relations use lowercase keys upstream.
    #[serde(rename = "membership")]
    pub membership: Option<Membership>,
    #[serde(rename = "person")]
    pub person: Person,
    #[serde(rename = "memberBookings", default)]
    pub member_bookings: Vec<MemberBooking>,
    #[serde(rename = "payments", default)]
    pub payments: Vec<serde_json::Value>,
}

/// Link between a member and a class booking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberBooking {
    #[serde(rename = "MemberBookingID")]
    pub member_booking_id: i64,
    #[serde(rename = "MemberID")]
    pub member_id: i64,
    #[serde(rename = "BookingID")]
    pub booking_id: i64,
}

/// A product sold at the gym shop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Product {
    #[serde(rename = "ProductID")]
    pub product_id: i64,
    pub product_name: String,
    pub description: String,
    pub price: String,
    pub stock_quantity: i64,
    #[serde(rename = "CategoryID")]
    pub category_id: i64,
    #[serde(rename = "PaymentID")]
    pub payment_id: Option<i64>,
}

/// Booking payload for `POST /bookings`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewBooking {
    #[serde(rename = "ClassID")]
    pub class_id: i64,
    /// Booking date, ISO `yyyy-mm-dd`.
    #[serde(rename = "BookingDate")]
    pub booking_date: String,
    #[serde(rename = "Status")]
    pub status: String,
    #[serde(rename = "MemberID")]
    pub member_id: i64,
}

impl NewBooking {
    /// Builds a confirmed booking for the given class and member, dated today.
    pub fn confirmed(class_id: i64, member_id: i64, booked_on: jiff::civil::Date) -> Self {
        Self {
            class_id,
            booking_date: booked_on.to_string(),
            status: "Confirmed".to_owned(),
            member_id,
        }
    }
}

/// Registration payload for `POST /register`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRegistration {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    /// ISO `yyyy-mm-dd`.
    pub date_of_birth: String,
    /// Identifier of the selected membership tier, as submitted by the form.
    pub membership_id: String,
    pub emergency_contact: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub password: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn member_deserializes_api_casing() {
        let payload = serde_json::json!({
            "MemberID": 7,
            "PersonID": 12,
            "MembershipID": null,
            "JoinDate": "2025-02-01",
            "EmergencyContact": "Jo Doe +4512345678",
            "membership": null,
            "person": {
                "PersonID": 12,
                "FirstName": "Jane",
                "LastName": "Doe",
                "Email": "jane@example.com",
                "Phone": "+4512345678",
                "Address": "Main Street 1",
                "DateOfBirth": "1990-05-01",
                "Role": "MEMBER",
                "ImageUrl": null
            },
            "memberBookings": [
                { "MemberBookingID": 1, "MemberID": 7, "BookingID": 33 }
            ],
            "payments": []
        });

        let member: Member = serde_json::from_value(payload).expect("member deserializes");
        assert_eq!(member.member_id, 7);
        assert_eq!(member.membership_id, None);
        assert_eq!(member.person.first_name, "Jane");
        assert_eq!(member.member_bookings.len(), 1);
    }

    #[test]
    fn booking_serializes_api_casing() {
        let booked_on = jiff::civil::date(2025, 3, 14);
        let booking = NewBooking::confirmed(42, 7, booked_on);
        let value = serde_json::to_value(&booking).expect("booking serializes");

        assert_eq!(
            value,
            serde_json::json!({
                "ClassID": 42,
                "BookingDate": "2025-03-14",
                "Status": "Confirmed",
                "MemberID": 7
            })
        );
    }

    #[test]
    fn registration_omits_absent_image() {
        let registration = NewRegistration {
            first_name: "Jane".into(),
            last_name: "Doe".into(),
            email: "jane@example.com".into(),
            phone: "+4512345678".into(),
            address: "Main Street 1".into(),
            date_of_birth: "1990-05-01".into(),
            membership_id: "2".into(),
            emergency_contact: "Jo Doe +4512345678".into(),
            image: None,
            password: "Sup3rSecret!".into(),
        };

        let value = serde_json::to_value(&registration).expect("registration serializes");
        assert!(value.get("image").is_none());
        assert_eq!(value["firstName"], "Jane");
        assert_eq!(value["membershipId"], "2");
    }
}
