use super::Report;
use anyhow::Result;
use console::style;

pub fn output_json(report: &Report) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(report)?);
    Ok(())
}

pub fn output_report(report: &Report) -> Result<()> {
    println!("{}", style("Top Contributors").bold());
    println!("{}", "─".repeat(50));
    match &report.top_contributors {
        Some(contributors) => {
            for (rank, c) in contributors.iter().enumerate() {
                println!("{:>2}. {:<40} {:>6}", rank + 1, c.author, style(c.commits).cyan());
            }
        }
        None => println!("No commit data available"),
    }

    println!("\n{}", style("Issue Close Rate").bold());
    println!("{}", "─".repeat(50));
    match &report.close_rate {
        Some(rate) => println!(
            "{} ({} closed)",
            style(format!("{:.2}", rate.ratio)).green(),
            rate.fraction()
        ),
        None => println!("No issue data available"),
    }

    println!("\n{}", style("Average Issue Resolution").bold());
    println!("{}", "─".repeat(50));
    match &report.average_resolution {
        Some(res) => println!(
            "{} days (over {} closed issues)",
            style(format!("{:.2}", res.average_days)).yellow(),
            res.resolved_issues
        ),
        None => println!("No closed issues with valid dates"),
    }

    let malformed = report.malformed_timestamps.total();
    if malformed > 0 {
        println!(
            "\n{} {} malformed timestamp(s) were ignored",
            style("Note:").dim(),
            malformed
        );
    }

    Ok(())
}
