pub mod aggregator;
mod parser;
pub mod schedule;
pub mod session;
pub mod types;
pub mod utils;

pub use aggregator::{SlotSource, fetch_month, fetch_range, fetch_week};
pub use parser::{extract_text, parse_attendees};
pub use session::{AuthError, Credentials, ScraperError, Session, authenticate};

pub(crate) const BASE_URL: &str = "https://wecankidsclub.younmanager.com";
