//! Page controllers for the complaint box frontend.
//!
//! One controller per page -- submission, tracking, admin -- each owning
//! its session state as instance fields and talking to the backend
//! through the [`gateway::ComplaintGateway`] trait. [`gateway::HttpGateway`]
//! is the production transport; tests substitute an in-memory fake.
//!
//! Controllers render plain text panels and typed row views; how those
//! reach the screen is the embedder's concern.

pub mod admin;
pub mod alert;
pub mod error;
pub mod gateway;
pub mod submission;
pub mod tracking;
pub mod types;

pub use admin::AdminController;
pub use error::ClientError;
pub use gateway::{ComplaintGateway, HttpGateway};
pub use submission::SubmissionController;
pub use tracking::TrackingController;
