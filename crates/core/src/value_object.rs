//! Value object trait: equality by value, not identity.
//!
//! Filter criteria, price ranges and page requests are value objects: they have
//! no identity and two with the same fields mean the same thing.

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by value**. To "modify" one,
/// build a new one with the new values.
///
/// ```ignore
/// #[derive(Debug, Clone, PartialEq, Eq)]
/// struct PriceRange { min: u64, max: u64 }
///
/// impl ValueObject for PriceRange {}
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
