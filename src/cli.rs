use anyhow::Result;
use serde::Serialize;
use std::fmt::Write as _;
use std::io::{self, BufRead, Write};

use duvet_finder::catalog::Catalog;
use duvet_finder::compare::compare;
use duvet_finder::config::RunConfig;
use duvet_finder::data::{ComparisonData, Preferences, Product, Recommendation};
use duvet_finder::matcher::{recommendation_summary, select_variant_with, top_matches};
use duvet_finder::questionnaire::run_interactive;

#[derive(Debug, Serialize)]
pub struct RecommendationReport<'a> {
    pub preferences: Preferences,
    pub summary: String,
    pub recommendations: Vec<Recommendation<'a>>,
}

fn ensure_format(format: &str) -> Result<()> {
    match format {
        "json" | "md" => Ok(()),
        _ => anyhow::bail!("Unknown format: {} (supported: json, md)", format),
    }
}

pub fn render_report(report: &RecommendationReport<'_>, format: &str) -> Result<String> {
    ensure_format(format)?;
    if format == "json" {
        return Ok(serde_json::to_string_pretty(report)?);
    }

    let mut out = String::new();
    writeln!(out, "# Dine anbefalede dyner\n")?;
    writeln!(out, "{}\n", report.summary)?;

    if report.recommendations.is_empty() {
        writeln!(out, "Ingen anbefalinger at vise.")?;
        return Ok(out);
    }

    for (rank, rec) in report.recommendations.iter().enumerate() {
        let variant = rec.variant;
        writeln!(
            out,
            "## {}. {} (match: {})\n",
            rank + 1,
            rec.product.display_name(),
            rec.score
        )?;
        writeln!(
            out,
            "**Variant:** {}, {}, {}x{} cm, {} {}",
            variant.duvet_type,
            variant.insulation,
            variant.width,
            variant.length,
            variant.price,
            variant.currency
        )?;
        writeln!(
            out,
            "**Kvalitet:** {} | **Bedømmelse:** {}/5 | **Garanti:** {} år",
            rec.product.quality, rec.product.rating, rec.product.years_warranty
        )?;
        if !rec.reasons.is_empty() {
            writeln!(out)?;
            for reason in &rec.reasons {
                writeln!(out, "- {}", reason)?;
            }
        }
        writeln!(out)?;
    }

    Ok(out)
}

pub fn render_comparison(data: &ComparisonData, format: &str) -> Result<String> {
    ensure_format(format)?;
    if format == "json" {
        return Ok(serde_json::to_string_pretty(data)?);
    }

    let mut out = String::new();
    writeln!(out, "# Sammenlign dyner\n")?;
    writeln!(out, "**Hovedforskelle:** {}\n", data.summary)?;
    writeln!(out, "| | {} | {} |", data.product1, data.product2)?;
    writeln!(out, "|---|---|---|")?;
    for row in &data.rows {
        let marker = if row.is_different { " *" } else { "" };
        writeln!(
            out,
            "| {}{} | {} | {} |",
            row.label, marker, row.value1, row.value2
        )?;
    }
    Ok(out)
}

fn build_report<'a>(
    catalog: &'a Catalog,
    config: &RunConfig,
    prefs: Preferences,
    top: Option<usize>,
) -> RecommendationReport<'a> {
    let n = top.unwrap_or(config.top_n);
    let recommendations = top_matches(catalog.products(), &prefs, &config.points, n);
    RecommendationReport {
        preferences: prefs,
        summary: recommendation_summary(&prefs),
        recommendations,
    }
}

/// Rank the catalog for `prefs` and print the top matches.
pub fn recommend(
    catalog_path: Option<&str>,
    config_path: Option<&str>,
    prefs: Preferences,
    top: Option<usize>,
    format: &str,
) -> Result<()> {
    ensure_format(format)?;
    let catalog = Catalog::open(catalog_path)?;
    let config = RunConfig::load_or_default(config_path)?;

    let report = build_report(&catalog, &config, prefs, top);
    print!("{}", render_report(&report, format)?);
    Ok(())
}

/// Ask the questionnaire on `input` with prompts on `prompts`, then render
/// the recommendations. Only the rendered result is returned.
fn questionnaire_report<R: BufRead, W: Write>(
    catalog: &Catalog,
    config: &RunConfig,
    input: R,
    prompts: &mut W,
    top: Option<usize>,
    format: &str,
) -> Result<String> {
    writeln!(prompts, "Find din dyne\n")?;
    let prefs = run_interactive(input, prompts)?;
    tracing::info!(preferences = ?prefs, "Questionnaire complete");

    let report = build_report(catalog, config, prefs, top);
    render_report(&report, format)
}

/// Run the questionnaire on stdin, then print recommendations.
///
/// Prompts go to stderr so stdout carries only the result.
pub fn ask(
    catalog_path: Option<&str>,
    config_path: Option<&str>,
    top: Option<usize>,
    format: &str,
) -> Result<()> {
    ensure_format(format)?;
    let catalog = Catalog::open(catalog_path)?;
    let config = RunConfig::load_or_default(config_path)?;

    let stdin = io::stdin();
    let rendered = questionnaire_report(
        &catalog,
        &config,
        stdin.lock(),
        &mut io::stderr(),
        top,
        format,
    )?;
    print!("{}", rendered);
    Ok(())
}

fn lookup<'a>(catalog: &'a Catalog, key: &str) -> Result<&'a Product> {
    catalog
        .find(key)
        .ok_or_else(|| anyhow::anyhow!("Product {} not found", key))
}

/// Compare two products, each in the variant it would be recommended in.
pub fn compare_products(
    catalog_path: Option<&str>,
    config_path: Option<&str>,
    first: &str,
    second: &str,
    prefs: Preferences,
    format: &str,
) -> Result<()> {
    ensure_format(format)?;
    let catalog = Catalog::open(catalog_path)?;
    let config = RunConfig::load_or_default(config_path)?;

    let p1 = lookup(&catalog, first)?;
    let p2 = lookup(&catalog, second)?;
    let v1 = select_variant_with(p1, &prefs, &config.points);
    let v2 = select_variant_with(p2, &prefs, &config.points);

    let data = compare((p1, v1), (p2, v2));
    print!("{}", render_comparison(&data, format)?);
    Ok(())
}

/// Load a catalog and report what it contains.
pub fn validate_catalog(catalog_path: Option<&str>) -> Result<()> {
    let catalog = Catalog::open(catalog_path)?;
    println!(
        "Catalog OK: {} products, {} variants",
        catalog.len(),
        catalog.variant_count()
    );
    Ok(())
}

pub fn list_catalog(catalog_path: Option<&str>, format: &str) -> Result<()> {
    ensure_format(format)?;
    let catalog = Catalog::open(catalog_path)?;

    if format == "json" {
        println!("{}", serde_json::to_string_pretty(catalog.products())?);
        return Ok(());
    }

    println!("| Slug | Navn | Kvalitet | Bedømmelse | Allergivenlig | Varianter |");
    println!("|---|---|---|---|---|---|");
    for product in catalog.products() {
        println!(
            "| {} | {} | {} | {} | {} | {} |",
            product.slug,
            product.display_name(),
            product.quality,
            product.rating,
            if product.allergy_friendly { "Ja" } else { "Nej" },
            product.variants.len()
        );
    }
    Ok(())
}
