//! Configuration module

mod site;

pub use site::MailchimpConfig;
pub use site::SiteConfig;
