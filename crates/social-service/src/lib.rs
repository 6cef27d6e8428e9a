//! # social-service
//!
//! Application layer containing business logic, services, DTOs, outgoing
//! mail and the scheduled analytics job.

pub mod dto;
pub mod jobs;
pub mod mailer;
pub mod services;

pub use jobs::{run_job_loop, AnalyticsAggregationJob, ScheduledJob};
pub use mailer::{EmailMessage, LogMailer, Mailer};
pub use services::{
    AnalyticsService, AnalyticsSettings, AuthService, AuthSettings, CommentService, PostService,
    ReactionService, ServiceContext, ServiceContextBuilder, ServiceError, ServiceResult,
    ServiceSettings, UserService,
};
