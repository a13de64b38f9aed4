//! `chatwise eval` — Evaluate an arithmetic expression.

pub fn run(expression: &str) -> Result<(), Box<dyn std::error::Error>> {
    let value = chatwise_tools::evaluate(expression)?;
    println!("{value}");
    Ok(())
}
