//! Core record types and key traits.
//!
//! This module defines:
//! - [`Record`]: The stored entity, keyed by its identifier.
//! - [`GroupStats`]: Per-group member count and score sum.
//! - [`CompositeKey`]: The trait the radix sorter uses to read a two-field key.
//! - [`KeySpec`]: A named, range-bounded key extractor for ad-hoc sorts.

/// Number of months, the range of the primary birthday key.
pub const MONTHS: u8 = 12;

/// Largest day of month, the range of the secondary birthday key.
pub const DAYS: u8 = 31;

/// Birth date components. Only `month` and `day` participate in ordering.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BirthDate {
    pub year: i32,
    pub month: u8,
    pub day: u8,
}

impl BirthDate {
    pub const fn new(year: i32, month: u8, day: u8) -> Self {
        Self { year, month, day }
    }
}

impl Default for BirthDate {
    fn default() -> Self {
        Self::new(2000, 1, 1)
    }
}

/// A single student.
///
/// `id` is unique across a [`RosterStore`](crate::store::RosterStore); `group` and
/// `score` feed the aggregate index. Name, birth date and phone are payload, except
/// that the birth month/day form the sort key.
#[derive(Clone, Debug, PartialEq)]
pub struct Record {
    pub name: String,
    pub surname: String,
    pub id: String,
    pub birth: BirthDate,
    pub group: String,
    pub score: f64,
    pub phone: String,
}

impl Record {
    /// Creates a record with empty payload fields and a default birth date.
    pub fn new(id: impl Into<String>, group: impl Into<String>, score: f64) -> Self {
        Self {
            name: String::new(),
            surname: String::new(),
            id: id.into(),
            birth: BirthDate::default(),
            group: group.into(),
            score,
            phone: String::new(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>, surname: impl Into<String>) -> Self {
        self.name = name.into();
        self.surname = surname.into();
        self
    }

    pub fn with_birth(mut self, year: i32, month: u8, day: u8) -> Self {
        self.birth = BirthDate::new(year, month, day);
        self
    }

    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = phone.into();
        self
    }
}

/// Running aggregate for one group.
///
/// The average is derived on demand and never stored.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GroupStats {
    pub count: usize,
    pub sum: f64,
}

impl GroupStats {
    /// Mean score of the group, `0.0` for an empty group.
    #[inline]
    pub fn average(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.sum / self.count as f64
        }
    }
}

/// A two-field key with small bounded ranges, read by the radix sorter.
///
/// Both keys must lie in `[1, MAX]`. Values outside that range are rejected by the
/// sorter rather than bucketed.
///
/// # Examples
///
/// ```
/// use roster::core::CompositeKey;
///
/// struct Slot {
///     week: u8,
///     weekday: u8,
/// }
///
/// impl CompositeKey for Slot {
///     const PRIMARY_MAX: u8 = 53;
///     const SECONDARY_MAX: u8 = 7;
///
///     fn primary(&self) -> u8 {
///         self.week
///     }
///
///     fn secondary(&self) -> u8 {
///         self.weekday
///     }
/// }
/// ```
pub trait CompositeKey {
    /// Upper bound of the most significant key.
    const PRIMARY_MAX: u8;
    /// Upper bound of the least significant key.
    const SECONDARY_MAX: u8;
    /// Name used in error reports for the primary key.
    const PRIMARY_NAME: &'static str = "primary";
    /// Name used in error reports for the secondary key.
    const SECONDARY_NAME: &'static str = "secondary";

    fn primary(&self) -> u8;

    fn secondary(&self) -> u8;
}

impl CompositeKey for BirthDate {
    const PRIMARY_MAX: u8 = MONTHS;
    const SECONDARY_MAX: u8 = DAYS;
    const PRIMARY_NAME: &'static str = "month";
    const SECONDARY_NAME: &'static str = "day";

    #[inline]
    fn primary(&self) -> u8 {
        self.month
    }

    #[inline]
    fn secondary(&self) -> u8 {
        self.day
    }
}

impl CompositeKey for Record {
    const PRIMARY_MAX: u8 = MONTHS;
    const SECONDARY_MAX: u8 = DAYS;
    const PRIMARY_NAME: &'static str = "month";
    const SECONDARY_NAME: &'static str = "day";

    #[inline]
    fn primary(&self) -> u8 {
        self.birth.month
    }

    #[inline]
    fn secondary(&self) -> u8 {
        self.birth.day
    }
}

// Lets snapshots of borrowed records be ordered without cloning.
impl<T: CompositeKey + ?Sized> CompositeKey for &T {
    const PRIMARY_MAX: u8 = T::PRIMARY_MAX;
    const SECONDARY_MAX: u8 = T::SECONDARY_MAX;
    const PRIMARY_NAME: &'static str = T::PRIMARY_NAME;
    const SECONDARY_NAME: &'static str = T::SECONDARY_NAME;

    #[inline]
    fn primary(&self) -> u8 {
        (**self).primary()
    }

    #[inline]
    fn secondary(&self) -> u8 {
        (**self).secondary()
    }
}

/// A named key extractor with a declared range `[1, max]`.
///
/// Used with [`radix_order_by`](crate::algo::radix_order_by) when the item type does
/// not implement [`CompositeKey`], or when a different pair of fields is wanted.
#[derive(Clone, Copy, Debug)]
pub struct KeySpec<F> {
    pub name: &'static str,
    pub max: u8,
    pub extract: F,
}

impl<F> KeySpec<F> {
    pub const fn new(name: &'static str, max: u8, extract: F) -> Self {
        Self { name, max, extract }
    }
}
