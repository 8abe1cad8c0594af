use dotenv::dotenv;
use statement_insight::{ApiConfig, Role, Session, StatementFile, UploadRequest};
use std::error::Error;
use std::io::{self, Write};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    dotenv().ok();
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.len() < 4 {
        eprintln!(
            "Usage: analyze_statements <statement_a.xlsx> <YYYYMM> <statement_b.xlsx> <YYYYMM> [hypotheses...]"
        );
        std::process::exit(1);
    }
    let hypotheses = if args.len() > 4 {
        Some(args[4..].join(" "))
    } else {
        None
    };

    let config = ApiConfig::from_env();
    println!("📊 Statement Insight (service at {})\n", config.base_url);

    let mut session = Session::new(config);

    match session.probe_connectivity().await {
        Ok(status) => println!("✅ Service is {}.\n", status.status),
        Err(_) => println!("⚠️  Could not reach the service; submitting anyway.\n"),
    }

    let upload = UploadRequest {
        statement_a: Some(StatementFile::from_path(&args[0]).await?),
        statement_b: Some(StatementFile::from_path(&args[2]).await?),
        label_a: args[1].clone(),
        label_b: args[3].clone(),
        hypotheses,
    };

    println!("⏳ Processing statements, this can take a while...");
    let report = match session.submit_statements(&upload).await {
        Ok(Some(report)) => report,
        Ok(None) => return Ok(()),
        Err(e) => {
            eprintln!("❌ {}", e);
            if let Some(hint) = e.remediation() {
                eprintln!("   ({})", hint);
            }
            std::process::exit(1);
        }
    };

    println!("\n===== Report =====\n");
    println!("{}", report.markdown);

    tokio::fs::write("report.html", report.to_html()).await?;
    println!("\n💾 HTML fragment written to report.html");
    println!("⬇️  Spreadsheet: {}", session.artifact_url()?);

    if !report.suggested_questions.is_empty() {
        println!("\n💡 Suggested questions:");
        for (index, question) in report.suggested_questions.iter().enumerate() {
            println!("  {}. {}", index + 1, question);
        }
    }

    println!(
        "\n🤖 Ready! Ask about the report (a number picks a suggestion, 'download' reprints the link, 'quit' exits)."
    );
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
        if prompt.eq_ignore_ascii_case("download") {
            println!("⬇️  {}", session.artifact_url()?);
            continue;
        }

        // A bare number submits the matching suggested question.
        let question = match prompt.parse::<usize>() {
            Ok(n) if n >= 1 && n <= report.suggested_questions.len() => {
                report.suggested_questions[n - 1].clone()
            }
            _ => prompt.to_string(),
        };

        println!("\nThinking...");
        match session.ask_question(&question).await {
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
