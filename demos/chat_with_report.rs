use dotenv::dotenv;
use statement_insight::{ApiConfig, Role, Session};
use std::error::Error;
use std::io::{self, Write};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    dotenv().ok();
    env_logger::init();

    let config = ApiConfig::from_env();
    println!("💬 Statement Insight chat (service at {})\n", config.base_url);

    let mut session = Session::new(config);

    let Some(saved) = session.restore_saved().await? else {
        println!("No saved analysis on the service. Run the analyze_statements demo first.");
        return Ok(());
    };
    println!(
        "✅ Resumed analysis {} ({} vs {}).\n",
        saved.result_id.as_deref().unwrap_or("?"),
        saved.label_a.as_deref().unwrap_or("?"),
        saved.label_b.as_deref().unwrap_or("?")
    );

    let report = session.fetch_report().await?;
    println!("===== Report =====\n");
    println!("{}\n", report.markdown);

    if !report.suggested_questions.is_empty() {
        println!("💡 Suggested questions:");
        for question in &report.suggested_questions {
            println!("  - {}", question);
        }
        println!();
    }

    println!("🤖 Ready! Ask questions about the report (type 'quit' to exit).");
    println!("------------------------------------------------------------------");

    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            break;
        }
        let prompt = input.trim();

        if prompt.eq_ignore_ascii_case("quit") || prompt.eq_ignore_ascii_case("exit") {
            break;
        }
        if prompt.is_empty() {
            continue;
        }

        println!("\nThinking...");
        match session.ask_question(prompt).await {
            Ok(Some(reply)) if reply.role == Role::Error => {
                eprintln!("❌ {}\n", reply.text);
            }
            Ok(Some(reply)) => {
                println!("\n{}\n", reply.text);
                println!("------------------------------------------------------------------");
            }
            Ok(None) => {}
            Err(e) => eprintln!("❌ Error: {}", e),
        }
    }

    Ok(())
}
