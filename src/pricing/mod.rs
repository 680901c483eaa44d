pub mod calendar;
pub mod context;
pub mod dates;
pub mod day_count;
pub mod engine;
pub mod heston;
pub mod option;
pub mod pricer;

pub use calendar::Calendar;
pub use context::{FlatForward, PricingContext};
pub use day_count::DayCounter;
pub use engine::{AnalyticHestonEngine, HestonProcess};
pub use heston::HestonParams;
pub use option::{EuropeanExercise, OptionType, PlainVanillaPayoff, VanillaOption};
pub use pricer::heston_price;
