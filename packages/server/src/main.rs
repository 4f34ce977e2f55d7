use tarefas_server::run_server;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    run_server().await
}
