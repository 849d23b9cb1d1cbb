//! MedPortal Domain - Core client types
//!
//! This crate defines the session, routing and request model of the
//! MedPortal client. All types here are pure Rust with no I/O dependencies.

pub mod error;
pub mod guard;
pub mod location;
pub mod notice;
pub mod request;
pub mod response;
pub mod route;
pub mod session;

pub use error::{DomainError, DomainResult};
pub use guard::{GuardDecision, decide, login_redirect};
pub use location::{Location, REDIRECT_PARAM};
pub use notice::{Notice, NoticeKind};
pub use request::{ApiRequest, Header, HttpMethod, OutgoingRequest};
pub use response::{ApiResponse, StatusCode};
pub use route::{
    LANDING_PATH, LOGIN_PATH, REGISTER_PATH, RouteDescriptor, RouteKind, RouteMatch, RouteMeta,
    RouteTable,
};
pub use session::{Session, UserProfile};
