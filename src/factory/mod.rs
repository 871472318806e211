//! Factory and registry for bonding curves.

mod curve_factory;

pub use curve_factory::{CurveFactory, CurveHandle, FactoryDefaults};
