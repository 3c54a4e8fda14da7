pub mod activities;
pub mod activity_detail;
pub mod activity_form;
pub mod dashboard;
pub mod error_banner;
pub mod error_page;
pub mod favorites;
pub mod home;
pub mod login_form;
pub mod media_gallery;
pub mod media_picker;
pub mod navbar;
pub mod place_detail;
pub mod profile;
pub mod public_profile;
pub mod rating_form;
pub mod register_form;
pub mod trip_detail;
pub mod trip_form;
pub mod trip_list;
pub mod visited_countries;
pub mod visited_places;

pub use activities::Activities;
pub use activity_detail::ActivityDetail;
pub use dashboard::Dashboard;
pub use error_page::ErrorPage;
pub use favorites::Favorites;
pub use home::Home;
pub use login_form::LoginForm;
pub use navbar::Navbar;
pub use place_detail::PlaceDetailView;
pub use profile::Profile;
pub use public_profile::PublicProfileView;
pub use register_form::RegisterForm;
pub use trip_detail::TripDetail;
