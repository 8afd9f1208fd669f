use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TravelerKind {
    #[default]
    Adult,
    Child,
    Infant,
}

impl TravelerKind {
    pub fn label(self) -> &'static str {
        match self {
            TravelerKind::Adult => "ADULT",
            TravelerKind::Child => "CHILD",
            TravelerKind::Infant => "INFANT",
        }
    }

    /// `< 2` infant, `< 12` child, otherwise adult. No age reads as adult.
    pub fn classify(age: Option<i32>) -> Self {
        match age {
            Some(a) if a < 2 => TravelerKind::Infant,
            Some(a) if a < 12 => TravelerKind::Child,
            _ => TravelerKind::Adult,
        }
    }
}

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Whole years between `dob` and `today`: the year difference, minus one if
/// this year's birthday has not been reached yet.
pub fn age_on(dob: &str, today: NaiveDate) -> Option<i32> {
    let birth = NaiveDate::parse_from_str(dob.trim(), DATE_FORMAT).ok()?;

    let mut age = today.year() - birth.year();
    if (today.month(), today.day()) < (birth.month(), birth.day()) {
        age -= 1;
    }
    Some(age)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Traveler {
    pub id: u64,
    /// Tag chosen when the traveler was added; never rewritten from the birth date
    pub kind: TravelerKind,
    pub title: String,
    pub first_name: String,
    pub last_name: String,
    pub gender: String,
    /// Raw `YYYY-MM-DD` input
    pub date_of_birth: String,
    pub nationality: String,
    pub frequent_flyer_number: String,
}

impl Traveler {
    pub fn blank(id: u64, kind: TravelerKind) -> Self {
        Self {
            id,
            kind,
            title: String::new(),
            first_name: String::new(),
            last_name: String::new(),
            gender: String::new(),
            date_of_birth: String::new(),
            nationality: "IN".to_string(),
            frequent_flyer_number: String::new(),
        }
    }

    pub fn age_on(&self, today: NaiveDate) -> Option<i32> {
        age_on(&self.date_of_birth, today)
    }

    pub fn derived_kind(&self, today: NaiveDate) -> TravelerKind {
        TravelerKind::classify(self.age_on(today))
    }

    /// True when a birth date is set and disagrees with the explicit tag
    pub fn kind_mismatch(&self, today: NaiveDate) -> bool {
        self.age_on(today).is_some() && self.derived_kind(today) != self.kind
    }

    fn field_mut(&mut self, field: TravelerField) -> &mut String {
        match field {
            TravelerField::Title => &mut self.title,
            TravelerField::FirstName => &mut self.first_name,
            TravelerField::LastName => &mut self.last_name,
            TravelerField::Gender => &mut self.gender,
            TravelerField::DateOfBirth => &mut self.date_of_birth,
            TravelerField::Nationality => &mut self.nationality,
            TravelerField::FrequentFlyer => &mut self.frequent_flyer_number,
        }
    }

    pub fn field(&self, field: TravelerField) -> &str {
        match field {
            TravelerField::Title => &self.title,
            TravelerField::FirstName => &self.first_name,
            TravelerField::LastName => &self.last_name,
            TravelerField::Gender => &self.gender,
            TravelerField::DateOfBirth => &self.date_of_birth,
            TravelerField::Nationality => &self.nationality,
            TravelerField::FrequentFlyer => &self.frequent_flyer_number,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TravelerField {
    Title,
    FirstName,
    LastName,
    Gender,
    DateOfBirth,
    Nationality,
    FrequentFlyer,
}

impl TravelerField {
    pub const ALL: [TravelerField; 7] = [
        TravelerField::Title,
        TravelerField::FirstName,
        TravelerField::LastName,
        TravelerField::Gender,
        TravelerField::DateOfBirth,
        TravelerField::Nationality,
        TravelerField::FrequentFlyer,
    ];

    pub fn label(self) -> &'static str {
        match self {
            TravelerField::Title => "Title",
            TravelerField::FirstName => "First name",
            TravelerField::LastName => "Last name",
            TravelerField::Gender => "Gender",
            TravelerField::DateOfBirth => "Date of birth",
            TravelerField::Nationality => "Nationality",
            TravelerField::FrequentFlyer => "Frequent flyer #",
        }
    }
}

/// Booking contact, shared by every traveler
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInfo {
    pub country_code: String,
    pub mobile: String,
    pub email: String,
    /// GST number, optional
    pub gst_number: Option<String>,
}

impl Default for ContactInfo {
    fn default() -> Self {
        Self {
            country_code: "+91".to_string(),
            mobile: String::new(),
            email: String::new(),
            gst_number: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ContactField {
    CountryCode,
    Mobile,
    Email,
    GstNumber,
}

impl ContactField {
    pub const ALL: [ContactField; 4] = [
        ContactField::CountryCode,
        ContactField::Mobile,
        ContactField::Email,
        ContactField::GstNumber,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ContactField::CountryCode => "Country code",
            ContactField::Mobile => "Mobile",
            ContactField::Email => "Email",
            ContactField::GstNumber => "GST number",
        }
    }
}

impl ContactInfo {
    pub fn field(&self, field: ContactField) -> &str {
        match field {
            ContactField::CountryCode => &self.country_code,
            ContactField::Mobile => &self.mobile,
            ContactField::Email => &self.email,
            ContactField::GstNumber => self.gst_number.as_deref().unwrap_or(""),
        }
    }
}

/// Where an inline validation message attaches
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FieldKey {
    Traveler { index: usize, field: TravelerField },
    Contact(ContactField),
}

pub type ValidationErrors = BTreeMap<FieldKey, &'static str>;

/// Travelers plus contact details for one booking.
#[derive(Debug, Clone)]
pub struct TravelerForm {
    travelers: Vec<Traveler>,
    contact: ContactInfo,
    passenger_count: usize,
    next_id: u64,
}

impl TravelerForm {
    /// One blank adult; at most `passenger_count` travelers (never below one)
    pub fn new(passenger_count: usize) -> Self {
        Self {
            travelers: vec![Traveler::blank(1, TravelerKind::Adult)],
            contact: ContactInfo::default(),
            passenger_count: passenger_count.max(1),
            next_id: 2,
        }
    }

    pub fn travelers(&self) -> &[Traveler] {
        &self.travelers
    }

    pub fn contact(&self) -> &ContactInfo {
        &self.contact
    }

    pub fn passenger_count(&self) -> usize {
        self.passenger_count
    }

    pub fn can_add(&self) -> bool {
        self.travelers.len() < self.passenger_count
    }

    /// Append a blank traveler tagged `kind`. Refused once every seat is filled.
    pub fn add(&mut self, kind: TravelerKind) -> bool {
        if !self.can_add() {
            return false;
        }

        let id = self.next_id;
        self.next_id += 1;
        self.travelers.push(Traveler::blank(id, kind));
        tracing::debug!("Added {} traveler #{}", kind.label(), id);
        true
    }

    /// Remove by index; the last remaining traveler stays.
    pub fn remove(&mut self, index: usize) -> bool {
        if self.travelers.len() <= 1 || index >= self.travelers.len() {
            return false;
        }

        let removed = self.travelers.remove(index);
        tracing::debug!("Removed traveler #{}", removed.id);
        true
    }

    pub fn update(&mut self, index: usize, field: TravelerField, value: impl Into<String>) -> bool {
        match self.travelers.get_mut(index) {
            Some(traveler) => {
                *traveler.field_mut(field) = value.into();
                true
            }
            None => false,
        }
    }

    pub fn update_contact(&mut self, field: ContactField, value: impl Into<String>) {
        let value = value.into();
        match field {
            ContactField::CountryCode => self.contact.country_code = value,
            ContactField::Mobile => self.contact.mobile = value,
            ContactField::Email => self.contact.email = value,
            ContactField::GstNumber => {
                self.contact.gst_number = if value.trim().is_empty() { None } else { Some(value) };
            }
        }
    }

    /// Required-field check. Messages are keyed per field and never block edits.
    pub fn validate(&self) -> ValidationErrors {
        let mut errors = ValidationErrors::new();

        for (index, traveler) in self.travelers.iter().enumerate() {
            let mut require = |field: TravelerField, message: &'static str| {
                if traveler.field(field).trim().is_empty() {
                    errors.insert(FieldKey::Traveler { index, field }, message);
                }
            };
            require(TravelerField::FirstName, "First name is required");
            require(TravelerField::LastName, "Last name is required");
            require(TravelerField::Gender, "Gender is required");
            require(TravelerField::DateOfBirth, "Date of birth is required");
        }

        if self.contact.mobile.trim().is_empty() {
            errors.insert(FieldKey::Contact(ContactField::Mobile), "Mobile number is required");
        }
        if self.contact.email.trim().is_empty() {
            errors.insert(FieldKey::Contact(ContactField::Email), "Email is required");
        }

        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 15).unwrap()
    }

    #[test]
    fn test_age_subtracts_before_birthday() {
        assert_eq!(age_on("2000-06-15", today()), Some(25));
        assert_eq!(age_on("2000-06-16", today()), Some(24));
        assert_eq!(age_on("2000-07-01", today()), Some(24));
        assert_eq!(age_on("2000-01-31", today()), Some(25));
    }

    #[test]
    fn test_age_unparseable() {
        assert_eq!(age_on("", today()), None);
        assert_eq!(age_on("15/06/2000", today()), None);
    }

    #[test]
    fn test_classification_boundaries() {
        let kind = |dob: &str| TravelerKind::classify(age_on(dob, today()));

        assert_eq!(kind("2024-01-10"), TravelerKind::Infant); // 1
        assert_eq!(kind("2020-03-01"), TravelerKind::Child); // 5
        assert_eq!(kind("1995-02-02"), TravelerKind::Adult); // 30
        assert_eq!(kind("2023-06-15"), TravelerKind::Child); // exactly 2 today
        assert_eq!(kind("2023-06-16"), TravelerKind::Infant); // 2 tomorrow
        assert_eq!(kind("2013-06-15"), TravelerKind::Adult); // exactly 12
        assert_eq!(kind(""), TravelerKind::Adult);
    }

    #[test]
    fn test_remove_last_traveler_is_noop() {
        let mut form = TravelerForm::new(3);
        assert!(!form.remove(0));
        assert_eq!(form.travelers().len(), 1);
    }

    #[test]
    fn test_remove_by_index() {
        let mut form = TravelerForm::new(3);
        form.add(TravelerKind::Child);
        form.add(TravelerKind::Infant);
        let kept_id = form.travelers()[2].id;

        assert!(form.remove(1));
        assert_eq!(form.travelers().len(), 2);
        assert_eq!(form.travelers()[1].id, kept_id);
        assert!(!form.remove(5));
    }

    #[test]
    fn test_add_respects_passenger_count() {
        let mut form = TravelerForm::new(2);
        assert!(form.add(TravelerKind::Child));
        assert!(!form.add(TravelerKind::Adult));
        assert_eq!(form.travelers().len(), 2);
        assert_eq!(form.travelers()[1].kind, TravelerKind::Child);
        assert_eq!(form.travelers()[1].nationality, "IN");
    }

    #[test]
    fn test_ids_are_unique() {
        let mut form = TravelerForm::new(4);
        form.add(TravelerKind::Adult);
        form.remove(1);
        form.add(TravelerKind::Adult);
        let ids: Vec<u64> = form.travelers().iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn test_derived_kind_does_not_overwrite_tag() {
        let mut form = TravelerForm::new(2);
        form.add(TravelerKind::Infant);
        form.update(1, TravelerField::DateOfBirth, "1990-01-01");

        let traveler = &form.travelers()[1];
        assert_eq!(traveler.kind, TravelerKind::Infant);
        assert_eq!(traveler.derived_kind(today()), TravelerKind::Adult);
        assert!(traveler.kind_mismatch(today()));
        assert!(!form.travelers()[0].kind_mismatch(today()));
    }

    #[test]
    fn test_update_fields() {
        let mut form = TravelerForm::new(1);
        assert!(form.update(0, TravelerField::FirstName, "Asha"));
        assert!(!form.update(3, TravelerField::FirstName, "Nobody"));
        assert_eq!(form.travelers()[0].field(TravelerField::FirstName), "Asha");

        form.update_contact(ContactField::GstNumber, "22AAAAA0000A1Z5");
        assert_eq!(form.contact().gst_number.as_deref(), Some("22AAAAA0000A1Z5"));
        form.update_contact(ContactField::GstNumber, "  ");
        assert_eq!(form.contact().gst_number, None);
    }

    #[test]
    fn test_validation_keys() {
        let mut form = TravelerForm::new(2);
        form.add(TravelerKind::Child);
        form.update(0, TravelerField::FirstName, "Asha");

        let errors = form.validate();
        assert!(!errors.contains_key(&FieldKey::Traveler { index: 0, field: TravelerField::FirstName }));
        assert_eq!(
            errors.get(&FieldKey::Traveler { index: 1, field: TravelerField::FirstName }),
            Some(&"First name is required")
        );
        assert!(errors.contains_key(&FieldKey::Contact(ContactField::Mobile)));
        assert!(errors.contains_key(&FieldKey::Contact(ContactField::Email)));
        // title, nationality and frequent flyer are optional
        assert!(!errors.contains_key(&FieldKey::Traveler { index: 0, field: TravelerField::Title }));

        // validation never blocks edits
        assert!(form.update(1, TravelerField::FirstName, "Ravi"));
    }

    #[test]
    fn test_complete_form_validates() {
        let mut form = TravelerForm::new(1);
        for (field, value) in [
            (TravelerField::FirstName, "Asha"),
            (TravelerField::LastName, "Rao"),
            (TravelerField::Gender, "F"),
            (TravelerField::DateOfBirth, "1990-04-01"),
        ] {
            form.update(0, field, value);
        }
        form.update_contact(ContactField::Mobile, "9876543210");
        form.update_contact(ContactField::Email, "asha@example.com");

        assert!(form.validate().is_empty());
    }
}
