pub mod github_client;

pub use github_client::GithubClient;
