// ============================================================================
// Basic Usage Example
// ============================================================================

use decimal_evaluator::prelude::*;
use std::sync::Arc;

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    println!("=== Decimal Evaluator Example ===\n");

    // Create an evaluator that logs every pipeline stage
    let evaluator = EvaluatorBuilder::new()
        .with_division_places(20)
        .with_event_handler(Arc::new(LoggingEvaluationHandler))
        .build()
        .expect("default configuration is valid");

    println!("Evaluating expressions...");
    let expressions = [
        "1 + 2 * 3",
        "2(3 + 4) - 1",
        "2299 / 66",
        "-2 ^ 2",
        "25.7 mod -5.1",
        "fact(29)",
        "sin(1) + cos(1)",
        "1 / 0",
        "(1 + 2",
    ];
    for expression in expressions {
        match evaluator.evaluate(expression) {
            Ok(value) => println!("  {expression} = {value}"),
            Err(error) => println!("  {expression} -> error: {error}"),
        }
    }

    // Step-wise pipeline
    println!("\n=== Pipeline Stages ===");
    let infix = evaluator.tokenize("2sin(0) + 3").expect("valid expression");
    println!("Infix:   {}", format_tokens(&infix));
    let postfix = evaluator.to_postfix(&infix).expect("balanced parentheses");
    println!("Postfix: {}", format_tokens(&postfix));
    match evaluator.evaluate_postfix(&postfix) {
        Ok(value) => println!("Value:   {value}"),
        Err(error) => println!("Error:   {error}"),
    }

    // Direct arithmetic on DecimalValue
    println!("\n=== Direct Arithmetic ===");
    let a: DecimalValue = "9870654.30210".parse().expect("valid number");
    let b: DecimalValue = "-012034.560789".parse().expect("valid number");
    println!("{a} * {b} = {}", &a * &b);
    if let Ok((q, r)) = a.div_rem(&b) {
        println!("{a} div {b} = {q} remainder {r}");
    }
    if let Ok(rounded) = a.round(2) {
        println!("{a} rounded to 2 places = {rounded}");
    }

    // Polynomial integral: 3x^2 + 2x + 1 from 0 to 2
    println!("\n=== Polynomial Integral ===");
    match evaluator.integrate_polynomial(&["1", "2", "3"], "0", "2") {
        Ok(area) => println!("integral of 3x^2 + 2x + 1 over [0, 2] = {area}"),
        Err(error) => println!("integral failed: {error}"),
    }
}
