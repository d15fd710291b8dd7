//! Random account data for registered shoppers.
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    OnceLock,
};

use rand::{distributions::Alphanumeric, seq::SliceRandom, Rng};

use crate::config::LoadTestConfig;

const FIRST_NAMES: &[&str] = &[
    "Ada", "Alan", "Grace", "Linus", "Barbara", "Dennis", "Margaret", "Ken", "Frances", "Edsger",
];
const LAST_NAMES: &[&str] = &[
    "Lovelace", "Turing", "Hopper", "Torvalds", "Liskov", "Ritchie", "Hamilton", "Thompson",
    "Allen", "Dijkstra",
];

/// incremented for every identity built by this process
static SEQUENCE: AtomicUsize = AtomicUsize::new(0);
/// random tag shared by every identity of this run, avoids clashes with earlier runs
static RUN_TAG: OnceLock<String> = OnceLock::new();

fn run_tag() -> &'static str {
    RUN_TAG.get_or_init(|| {
        rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(6)
            .map(|c| char::from(c).to_ascii_lowercase())
            .collect()
    })
}

#[derive(Debug, Clone, PartialEq)]
/// The account a shopper registers with, fixed for the whole session
pub struct Identity {
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub email: String,
    pub password: String,
    pub phone: String,
    pub image_url: String,
}

impl Identity {
    /// builds a new identity, username and email are unique within this process
    pub fn generate(config: &LoadTestConfig) -> Self {
        let sequence = SEQUENCE.fetch_add(1, Ordering::Relaxed);
        let mut rng = rand::thread_rng();

        let first_name = FIRST_NAMES.choose(&mut rng).copied().unwrap_or("Load");
        let last_name = LAST_NAMES.choose(&mut rng).copied().unwrap_or("Tester");
        let username = format!("{}_{}_{sequence}", config.username_prefix, run_tag());
        let phone = format!("7000{:06}", rng.gen_range(0..1_000_000));

        Identity {
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            email: format!("{username}@{}", config.email_domain),
            image_url: format!("https://cdn.example.com/avatars/{username}.png"),
            username,
            password: config.password.clone(),
            phone,
        }
    }
}
