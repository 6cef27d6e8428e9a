//! The simulation run
//!
//! Each phase logs what it does. A failed request is logged and skipped, it
//! never aborts the run.

use std::collections::BTreeMap;

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{error, info, warn};

use crate::client::{ApiClient, LikeOutcome, SignupOutcome};
use crate::config::BotConfig;

/// Counts of what the run achieved
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SimulationReport {
    pub signed_up: u32,
    pub logged_in: u32,
    pub posts_created: u32,
    pub likes: u32,
}

/// Bot account names `user_1..user_n`
pub fn usernames(count: u32) -> Vec<String> {
    (1..=count).map(|n| format!("user_{n}")).collect()
}

pub struct Simulation {
    client: ApiClient,
    config: BotConfig,
}

impl Simulation {
    pub fn new(config: BotConfig) -> Self {
        Self {
            client: ApiClient::new(config.base_url.clone()),
            config,
        }
    }

    pub async fn run(&self) -> SimulationReport {
        let mut report = SimulationReport::default();
        let users = usernames(self.config.number_of_users);

        self.signup_users(&users, &mut report).await;
        let tokens = self.login_users(&users, &mut report).await;
        self.create_posts(&tokens, &mut report).await;
        self.like_posts(&tokens, &mut report).await;

        info!(?report, "Simulation finished");
        report
    }

    async fn signup_users(&self, users: &[String], report: &mut SimulationReport) {
        for username in users {
            match self.client.signup(username).await {
                Ok(SignupOutcome::Created) => {
                    report.signed_up += 1;
                    info!(%username, "User signed up");
                }
                Ok(SignupOutcome::AlreadyRegistered) => {
                    info!(%username, "User already registered");
                }
                Err(e) => error!(%username, error = %e, "Signup failed"),
            }
        }
    }

    async fn login_users(
        &self,
        users: &[String],
        report: &mut SimulationReport,
    ) -> BTreeMap<String, String> {
        let mut tokens = BTreeMap::new();
        for username in users {
            match self.client.login(username).await {
                Ok(token) => {
                    report.logged_in += 1;
                    info!(%username, "User logged in");
                    tokens.insert(username.clone(), token);
                }
                Err(e) => error!(%username, error = %e, "Login failed"),
            }
        }
        tokens
    }

    async fn create_posts(&self, tokens: &BTreeMap<String, String>, report: &mut SimulationReport) {
        for (username, token) in tokens {
            let count = rand::thread_rng().gen_range(1..=self.config.max_posts_per_user);
            for n in 1..=count {
                let text = format!("Post {n} by {username}");
                match self.client.create_post(token, &text).await {
                    Ok(post_id) => {
                        report.posts_created += 1;
                        info!(%username, post_id, "Post created");
                    }
                    Err(e) => error!(%username, error = %e, "Post creation failed"),
                }
            }
        }
    }

    async fn like_posts(&self, tokens: &BTreeMap<String, String>, report: &mut SimulationReport) {
        let post_ids = match self.client.all_post_ids().await {
            Ok(ids) if !ids.is_empty() => ids,
            Ok(_) => {
                warn!("No posts to like");
                return;
            }
            Err(e) => {
                error!(error = %e, "Could not fetch the feed");
                return;
            }
        };

        for (username, token) in tokens {
            let picks: Vec<i64> = {
                let mut rng = rand::thread_rng();
                let count = rng.gen_range(1..=self.config.max_likes_per_user);
                (0..count)
                    .filter_map(|_| post_ids.choose(&mut rng).copied())
                    .collect()
            };

            for post_id in picks {
                match self.client.like(token, post_id).await {
                    Ok(LikeOutcome::Liked) => {
                        report.likes += 1;
                        info!(%username, post_id, "Post liked");
                    }
                    Ok(LikeOutcome::AlreadyLiked) => {
                        info!(%username, post_id, "Post already liked, skipping");
                    }
                    Err(e) => error!(%username, post_id, error = %e, "Like failed"),
                }
            }
        }
    }
}
