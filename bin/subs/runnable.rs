use anyhow::Result;

#[async_trait::async_trait]
pub trait RunnableSubcommand {
    async fn run(&self) -> Result<()>;
}
