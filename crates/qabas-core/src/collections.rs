// Collection names in the document store

pub const VIDEOS: &str = "videos";
pub const PODCASTS: &str = "podcasts";
pub const BENEFITS: &str = "benefits";
pub const COFFEE_STORIES: &str = "coffeeStories";
pub const CHAPTERS: &str = "chapters";
pub const PLAYLISTS: &str = "playlists";
pub const CONTACT_FORMS: &str = "contactForms";
pub const JOIN_REQUESTS: &str = "joinRequests";

/// Documents keyed by admin uid; the body is informational only.
pub const ADMINS: &str = "admins";
