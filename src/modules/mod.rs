//! Feature modules. Each follows the same layout: `model` for rows and
//! DTOs, `service` for the scoping and access rules, `controller` for the
//! HTTP surface, `router` for route wiring.

pub mod assignments;
pub mod attendance;
pub mod auth;
pub mod courses;
pub mod dashboard;
pub mod feedback;
pub mod marks;
pub mod notifications;
pub mod students;
pub mod submissions;
pub mod teachers;
pub mod users;
