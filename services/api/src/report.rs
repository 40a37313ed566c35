use crate::infra::context_resolver;
use clap::Args;
use geoequity::config::AppConfig;
use geoequity::error::AppError;
use geoequity::scoring::{
    parse_locations, parse_participation, validate_identifier, validate_location,
    validate_purchase, AggregateView, AreaComparisonView, ParticipationSet, PublishedLaborData,
    ScoreV1View, ScoreV2View, ScoreV4_2View, ScoringEngine, DEFAULT_COMPARISON_CATEGORY,
};
use serde::Serialize;
use std::fmt::Write as _;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// Merchant identifier, e.g. supermarket_101
    pub(crate) store_id: String,
    /// ZIP code or state-county-tract triple (defaults to the configured location)
    #[arg(long)]
    pub(crate) zip: Option<String>,
    /// Purchase amount in dollars (defaults to 100)
    #[arg(long)]
    pub(crate) purchase: Option<f64>,
    /// Category override; unknown categories fall back to the default profile
    #[arg(long)]
    pub(crate) category: Option<String>,
    /// Participation commitments as a JSON object keyed by activity type
    #[arg(long)]
    pub(crate) participation: Option<String>,
    /// Skip Census lookups and score against the fallback context
    #[arg(long)]
    pub(crate) offline: bool,
    /// Print JSON instead of the text report
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct AggregateArgs {
    /// Merchant identifiers to average
    pub(crate) store_ids: Vec<String>,
    /// ZIP code or state-county-tract triple (defaults to the configured location)
    #[arg(long)]
    pub(crate) zip: Option<String>,
    /// Skip Census lookups and score against the fallback context
    #[arg(long)]
    pub(crate) offline: bool,
    /// Print JSON instead of the text report
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct CompareArgs {
    /// Category scored in every location (defaults to supermarket)
    #[arg(long)]
    pub(crate) category: Option<String>,
    /// Location to include; repeat for more (defaults to five reference ZIP codes)
    #[arg(long = "zip")]
    pub(crate) zips: Vec<String>,
    /// Skip Census lookups and score against the fallback context
    #[arg(long)]
    pub(crate) offline: bool,
    /// Print JSON instead of the text report
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Debug, Serialize)]
pub(crate) struct ScoreReport {
    pub(crate) v1: ScoreV1View,
    pub(crate) v2: ScoreV2View,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) v4_2: Option<ScoreV4_2View>,
}

pub(crate) async fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;
    config.census.offline |= args.offline;

    let store_id = validate_identifier(&args.store_id).map_err(AppError::Request)?;
    let purchase = validate_purchase(args.purchase).map_err(AppError::Request)?;
    let location = validate_location(args.zip.as_deref(), &config.scoring.default_location)
        .map_err(AppError::Request)?;
    let participation = args
        .participation
        .as_deref()
        .map(parse_participation)
        .transpose()
        .map_err(AppError::Request)?;
    let category = args.category;

    let report = tokio::task::spawn_blocking(move || {
        let engine = ScoringEngine::new(
            context_resolver(&config.census)?,
            Arc::new(PublishedLaborData::standard()),
            config.scoring.settings(),
        );
        let category = category.as_deref();
        let v1 = engine.score_v1(&store_id, category, &location);
        let v2 = engine.score_v2(&store_id, category, purchase, &location);
        let v4_2 = participation.map(|set: ParticipationSet| {
            engine.score_v4_2(&store_id, category, purchase, &location, &set)
        });

        Ok::<_, AppError>(ScoreReport {
            v1: ScoreV1View::from(&v1),
            v2: ScoreV2View::from(&v2),
            v4_2: v4_2.as_ref().map(ScoreV4_2View::from),
        })
    })
    .await
    .map_err(|error| AppError::Io(std::io::Error::other(error)))??;

    if args.json {
        println!("{}", to_json(&report)?);
    } else {
        print!("{}", render_score_report(&report));
    }
    Ok(())
}

pub(crate) async fn run_aggregate(args: AggregateArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;
    config.census.offline |= args.offline;

    let stores = args
        .store_ids
        .iter()
        .map(|store| validate_identifier(store))
        .collect::<Result<Vec<_>, _>>()
        .map_err(AppError::Request)?;
    let location = validate_location(args.zip.as_deref(), &config.scoring.default_location)
        .map_err(AppError::Request)?;

    let view = tokio::task::spawn_blocking(move || {
        let engine = ScoringEngine::new(
            context_resolver(&config.census)?,
            Arc::new(PublishedLaborData::standard()),
            config.scoring.settings(),
        );
        Ok::<_, AppError>(AggregateView::from(&engine.aggregate(&stores, &location)))
    })
    .await
    .map_err(|error| AppError::Io(std::io::Error::other(error)))??;

    if args.json {
        println!("{}", to_json(&view)?);
    } else {
        print!("{}", render_aggregate(&view));
    }
    Ok(())
}

pub(crate) async fn run_compare(args: CompareArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;
    config.census.offline |= args.offline;

    let zips = args.zips.join(",");
    let locations = parse_locations(Some(zips.as_str())).map_err(AppError::Request)?;
    let category = args
        .category
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_COMPARISON_CATEGORY.to_string());

    let view = tokio::task::spawn_blocking(move || {
        let engine = ScoringEngine::new(
            context_resolver(&config.census)?,
            Arc::new(PublishedLaborData::standard()),
            config.scoring.settings(),
        );
        let comparison = engine.compare_areas(&category, &locations);
        Ok::<_, AppError>(AreaComparisonView::from(&comparison))
    })
    .await
    .map_err(|error| AppError::Io(std::io::Error::other(error)))??;

    if args.json {
        println!("{}", to_json(&view)?);
    } else {
        print!("{}", render_area_comparison(&view));
    }
    Ok(())
}

fn to_json<T: Serialize>(value: &T) -> Result<String, AppError> {
    serde_json::to_string_pretty(value).map_err(|error| AppError::Io(error.into()))
}

pub(crate) fn render_score_report(report: &ScoreReport) -> String {
    let v1 = &report.v1;
    let v2 = &report.v2;
    let mut out = String::new();

    let _ = writeln!(out, "EJV report for {} in {}", v1.store_id, v1.location);
    let _ = writeln!(
        out,
        "Context: {:.1}% unemployment | ${} median income | living wage ${:.2}/h",
        v1.context.unemployment_rate, v1.context.median_income, v1.living_wage
    );
    let _ = writeln!(
        out,
        "Payroll ({}): {} employees at ${:.2}/h | ${:.2}/day | {:.1}% local hires",
        v1.payroll.category,
        v1.payroll.active_employees,
        v1.payroll.avg_wage,
        v1.payroll.daily_payroll,
        v1.payroll.local_hire_pct * 100.0
    );

    let _ = writeln!(out, "\nv1 score {:.2} / 100", v1.ejv_score);
    let _ = writeln!(
        out,
        "- wage {:.2} | hiring {:.2} | community {:.2} | participation {:.2}",
        v1.sub_scores.wage,
        v1.sub_scores.hiring,
        v1.sub_scores.community,
        v1.sub_scores.participation
    );
    let _ = writeln!(
        out,
        "- wealth retained ${:.2} | leakage ${:.2}",
        v1.wealth_retained, v1.wealth_leakage
    );

    let _ = writeln!(
        out,
        "\nv2 impact ${:.2} on a ${:.2} purchase",
        v2.ejv_v2, v2.purchase_amount
    );
    let _ = writeln!(
        out,
        "- justice score {:.2} | local capture {:.3} | v1 comparison {:.2}",
        v2.justice_score, v2.local_capture, v2.v1_comparison_score
    );
    let _ = writeln!(
        out,
        "- need modifiers AES {:.3} | ART {:.3} | HWI {:.3}",
        v2.need_modifiers.aes, v2.need_modifiers.art, v2.need_modifiers.hwi
    );
    for (dimension, value) in &v2.adjusted_dimensions {
        let _ = writeln!(out, "  - {dimension}: {value:.3}");
    }

    if let Some(v4_2) = &report.v4_2 {
        let _ = writeln!(
            out,
            "\nv4.2 impact ${:.2} (amplification x{:.4}, +${:.2})",
            v4_2.ejv_v4_2, v4_2.participation_amplification_factor, v4_2.amplification_value
        );
        for contribution in &v4_2.participation_breakdown {
            let _ = writeln!(
                out,
                "  - {}: {:.1} h for {:.0} months{} -> {:.4}",
                contribution.label,
                contribution.hours,
                contribution.duration_months,
                if contribution.verified { " (verified)" } else { "" },
                contribution.contribution
            );
        }
    }

    out
}

pub(crate) fn render_aggregate(view: &AggregateView) -> String {
    if view.count == 0 {
        return "No merchants supplied; nothing to aggregate.\n".to_string();
    }

    let mut out = String::new();
    let _ = writeln!(out, "Aggregate of {} merchants", view.count);
    let _ = writeln!(out, "- average v1 score {:.2}", view.average_score);
    let _ = writeln!(
        out,
        "- wealth retained ${:.2} | leakage ${:.2}",
        view.total_retained, view.total_leakage
    );
    out
}

pub(crate) fn render_area_comparison(view: &AreaComparisonView) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Area comparison for {} across {} locations",
        view.category, view.summary.count
    );
    for area in &view.areas {
        let _ = writeln!(
            out,
            "- {}: v1 {:.2} | {:.1}% unemployment | retained ${:.2} | leakage ${:.2}",
            area.location,
            area.ejv_score,
            area.context.unemployment_rate,
            area.wealth_retained,
            area.wealth_leakage
        );
    }
    let _ = writeln!(
        out,
        "Average v1 score {:.2} | retained ${:.2} | leakage ${:.2} | retention {:.1}%",
        view.summary.average_score,
        view.summary.total_retained,
        view.summary.total_leakage,
        view.summary.retention_rate
    );
    out
}
