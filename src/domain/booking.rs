use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// An address must be longer than this many characters (after trimming).
pub const MIN_ADDRESS_CHARS: usize = 5;
/// A contact phone needs at least this many characters.
pub const MIN_PHONE_CHARS: usize = 10;

/// Size bracket of the area to be landscaped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AreaType {
    /// Up to 200 m².
    #[serde(rename = "200")]
    SmallMedium,
    /// Up to 400 m².
    #[serde(rename = "400")]
    Large,
    /// Size described by the customer in `custom_area_size`.
    #[serde(rename = "custom")]
    Custom,
}

impl AreaType {
    pub const ALL: [AreaType; 3] = [AreaType::SmallMedium, AreaType::Large, AreaType::Custom];

    pub fn is_custom(&self) -> bool {
        matches!(self, AreaType::Custom)
    }
}

/// The in-progress booking threaded through the wizard screens.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRecord {
    pub date: Option<NaiveDate>,
    pub address: String,
    pub area_type: Option<AreaType>,
    pub custom_area_size: String,
    pub phone: String,
}

impl BookingRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Overwrites only the fields carried by `update`.
    pub fn merge(&mut self, update: BookingUpdate) {
        let BookingUpdate {
            date,
            address,
            area_type,
            custom_area_size,
            phone,
        } = update;
        if let Some(date) = date {
            self.date = date;
        }
        if let Some(address) = address {
            self.address = address;
        }
        if let Some(area_type) = area_type {
            self.area_type = area_type;
        }
        if let Some(size) = custom_area_size {
            self.custom_area_size = size;
        }
        if let Some(phone) = phone {
            self.phone = phone;
        }
    }

    pub fn has_valid_address(&self) -> bool {
        self.address.trim().chars().count() > MIN_ADDRESS_CHARS
    }

    pub fn has_valid_area(&self) -> bool {
        match self.area_type {
            Some(AreaType::Custom) => !self.custom_area_size.is_empty(),
            Some(_) => true,
            None => false,
        }
    }

    /// Gate for leaving the details screen.
    pub fn details_complete(&self) -> bool {
        self.has_valid_address() && self.has_valid_area()
    }

    /// Gate for opening the confirmation dialog.
    pub fn contact_complete(&self) -> bool {
        self.phone.chars().count() >= MIN_PHONE_CHARS
    }
}

/// Partial assignment applied with [`BookingRecord::merge`].
///
/// `None` leaves a field untouched. Optional record fields use a nested
/// option so they can be explicitly cleared.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookingUpdate {
    pub date: Option<Option<NaiveDate>>,
    pub address: Option<String>,
    pub area_type: Option<Option<AreaType>>,
    pub custom_area_size: Option<String>,
    pub phone: Option<String>,
}

impl BookingUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn date(mut self, date: NaiveDate) -> Self {
        self.date = Some(Some(date));
        self
    }

    pub fn address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    pub fn area_type(mut self, area: AreaType) -> Self {
        self.area_type = Some(Some(area));
        self
    }

    pub fn clear_area_type(mut self) -> Self {
        self.area_type = Some(None);
        self
    }

    pub fn custom_area_size(mut self, size: impl Into<String>) -> Self {
        self.custom_area_size = Some(size.into());
        self
    }

    pub fn phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
