//! # Classtrack API
//!
//! A REST API built with Rust, Axum, and PostgreSQL for running a school:
//! accounts and profiles, courses, attendance registers, assignments and
//! submissions, exam marks, notifications, and feedback.
//!
//! ## Overview
//!
//! The load-bearing idea is role-scoped access: every request carries a
//! JWT-derived principal (`admin`, `teacher`, or `student`), and every
//! read and write is shaped by that principal before it reaches storage.
//! Students only ever see their own rows, teachers only operate on courses
//! assigned to them, and admins see everything. Acting profiles are always
//! resolved server-side from the token; a client can never name another
//! student or teacher as the actor.
//!
//! ## Architecture
//!
//! ```text
//! src/
//! ├── config/           # Environment configuration (JWT, database, CORS)
//! ├── middleware/       # Auth extractor and role gates
//! ├── modules/          # Feature modules
//! │   ├── auth/        # Login, logout, session introspection
//! │   ├── users/       # Account administration
//! │   ├── students/    # Student profiles
//! │   ├── teachers/    # Teacher profiles
//! │   ├── courses/     # Courses and section rosters
//! │   ├── attendance/  # Daily attendance registers
//! │   ├── assignments/ # Assignments
//! │   ├── submissions/ # Submissions and grading
//! │   ├── marks/       # Exam marks
//! │   ├── notifications/ # Role-targeted announcements
//! │   ├── feedback/    # Student feedback
//! │   └── dashboard/   # Per-role dashboards and admin reports
//! ├── store/            # Storage collaborator (PostgreSQL + in-memory)
//! └── utils/            # Shared utilities
//! ```
//!
//! Each feature module follows a consistent structure: `model` for rows
//! and DTOs, `service` for scoping and access rules, `controller` for the
//! HTTP surface, `router` for route wiring.

pub mod config;
pub mod docs;
pub mod logging;
pub mod middleware;
pub mod modules;
pub mod router;
pub mod state;
pub mod store;
pub mod utils;
pub mod validator;
