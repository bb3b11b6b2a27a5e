use anyhow::Result;

fn main() -> Result<()> {
    repo_review::cli::run()
}
