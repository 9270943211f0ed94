//! Analytics commands: features, insights, alerts, chat
//!
//! Each command mirrors one screen of the companion: build the feature
//! vector for the business, run the relevant engine, render the result.

use std::path::Path;

use anyhow::Result;

use bizmitra_core::{
    quick_insights, AlertEngine, FeatureBuilder, FeatureVector, GuidedChat, InsightEngine, Level,
};

use super::{load_scorer, open_db, resolve_business};

fn level_icon(level: Level) -> &'static str {
    match level {
        Level::Success => "✅",
        Level::Warning => "⚠️ ",
        Level::Risk => "🚨",
        Level::Neutral => "ℹ️ ",
    }
}

fn build_features(
    db_path: &Path,
    model_path: &Path,
    scaler_path: &Path,
    business_id: i64,
) -> Result<(bizmitra_core::Database, String, FeatureVector)> {
    let db = open_db(db_path)?;
    let business = resolve_business(&db, business_id)?;
    let scorer = load_scorer(model_path, scaler_path)?;

    let features = FeatureBuilder::new(&db, &scorer).build(business_id)?;
    Ok((db, business.name, features))
}

pub fn cmd_features(
    db_path: &Path,
    model_path: &Path,
    scaler_path: &Path,
    business_id: i64,
    json: bool,
) -> Result<()> {
    let (_db, name, features) = build_features(db_path, model_path, scaler_path, business_id)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&features)?);
        return Ok(());
    }

    println!();
    println!("📐 Features — {}", name);
    println!("   ─────────────────────────────────────────");
    println!("   Bills:          {}", features.bills_count);
    println!("   Unpaid ratio:   {:.0}%", features.unpaid_ratio * 100.0);
    println!("   Total sales:    ₹{:.2}", features.total_sales);
    println!("   Avg bill value: ₹{:.2}", features.avg_bill_value);
    println!("   Sales trend:    {}", features.sales_trend);
    println!("   Risk score:     {:.0}%", features.risk_score * 100.0);
    println!();

    Ok(())
}

pub fn cmd_insights(
    db_path: &Path,
    model_path: &Path,
    scaler_path: &Path,
    business_id: i64,
    json: bool,
) -> Result<()> {
    let (db, name, features) = build_features(db_path, model_path, scaler_path, business_id)?;

    let insights = InsightEngine::new().generate(&features);
    let quick = quick_insights(&db, business_id)?;

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "features": features,
                "insights": insights,
                "quick_insights": quick,
            }))?
        );
        return Ok(());
    }

    println!();
    println!("💡 Insights — {}", name);
    println!("   ─────────────────────────────────────────");
    for insight in &insights {
        println!("   {} {}", level_icon(insight.level), insight.title);
        println!("      {}", insight.message);
        println!("      → {}", insight.recommendation);
    }
    println!();
    println!("   At a glance:");
    for line in &quick {
        println!("   • {}", line);
    }
    println!();

    Ok(())
}

pub fn cmd_alerts(
    db_path: &Path,
    model_path: &Path,
    scaler_path: &Path,
    business_id: i64,
    json: bool,
) -> Result<()> {
    let (_db, name, features) = build_features(db_path, model_path, scaler_path, business_id)?;

    let alerts = AlertEngine::new().generate(&features);

    if json {
        println!("{}", serde_json::to_string_pretty(&alerts)?);
        return Ok(());
    }

    println!();
    println!("🔔 Alerts — {}", name);
    println!("   ─────────────────────────────────────────");
    for alert in &alerts {
        println!("   {} {}", level_icon(alert.level), alert.title);
        println!("      {}", alert.message);
    }
    println!();

    Ok(())
}

pub fn cmd_chat(
    db_path: &Path,
    model_path: &Path,
    scaler_path: &Path,
    business_id: i64,
    query: &str,
) -> Result<()> {
    let (_db, name, features) = build_features(db_path, model_path, scaler_path, business_id)?;

    let response = GuidedChat::new().respond(query, &features);

    println!();
    println!("💬 {} — \"{}\"", name, query);
    println!("   {}", response);
    println!();

    Ok(())
}
