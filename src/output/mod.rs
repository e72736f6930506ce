use crate::dosing::Dose;
use crate::error::PKResult;
use crate::params::ParameterStore;
use crate::simulation::{SeriesSet, SimulationSummary};
use std::path::Path;
use std::fs::File;
use log::info;

pub fn save_results<P: AsRef<Path>>(
    set: &SeriesSet,
    doses: &[Dose],
    params: &ParameterStore,
    output_dir: P,
) -> PKResult<()> {
    let output_path = output_dir.as_ref();

    save_series(set, &output_path.join("series.csv"))?;
    save_doses(doses, &output_path.join("doses.csv"))?;

    let summary = SimulationSummary::from_results(set, params);
    save_summary(&summary, &output_path.join("summary.json"))?;
    generate_report(&summary, params, &output_path.join("simulation_report.md"))?;

    info!("All results saved to {:?}", output_path);
    Ok(())
}

/// One row per sample instant: TIME, TOTAL, then one column per dose label.
fn save_series<P: AsRef<Path>>(set: &SeriesSet, path: P) -> PKResult<()> {
    let mut writer = csv::Writer::from_path(path)?;

    let mut header = vec!["TIME".to_string(), "TOTAL".to_string()];
    header.extend(set.per_dose.iter().map(|d| d.label.clone()));
    writer.write_record(&header)?;

    for (i, time) in set.times.iter().enumerate() {
        let mut record = vec![time.to_string(), set.total[i].to_string()];
        record.extend(set.per_dose.iter().map(|d| d.series[i].to_string()));
        writer.write_record(&record)?;
    }

    writer.flush()?;
    Ok(())
}

fn save_doses<P: AsRef<Path>>(doses: &[Dose], path: P) -> PKResult<()> {
    let mut writer = csv::Writer::from_path(path)?;

    writer.write_record(["ID", "KIND", "TIME", "AMOUNT", "COLOR"])?;

    for dose in doses {
        writer.write_record(&[
            dose.id.to_string(),
            dose.kind.to_string(),
            dose.time.to_string(),
            dose.amount.to_string(),
            dose.color.clone(),
        ])?;
    }

    writer.flush()?;
    Ok(())
}

fn save_summary<P: AsRef<Path>>(summary: &SimulationSummary, path: P) -> PKResult<()> {
    let file = File::create(path)?;
    serde_json::to_writer_pretty(file, summary)?;
    Ok(())
}

pub fn generate_report<P: AsRef<Path>>(
    summary: &SimulationSummary,
    params: &ParameterStore,
    path: P,
) -> PKResult<()> {
    let mut dose_rows = String::new();
    for dose in &summary.doses {
        dose_rows.push_str(&format!(
            "| {} | {} | {:.2} | {} | {:.2} |\n",
            dose.id,
            dose.label,
            dose.curve.cmax,
            dose.curve.tmax.map(|t| format!("{}h", t)).unwrap_or_else(|| "-".to_string()),
            dose.curve.auc,
        ));
    }

    let report_content = format!(
        r#"# Stimulant Concentration Simulation Report

Generated: {}

## Parameters
- **Metabolism**: {}
- **Active curves**: {}

## Total Concentration
- Cmax: {:.2} ng/mL
- Tmax: {}
- AUC: {:.2} ng*h/mL
- Time points: {}

## Doses
| ID | Dose | Cmax (ng/mL) | Tmax | AUC (ng*h/mL) |
|----|------|--------------|------|---------------|
{}
## Files Generated
- `series.csv`: Concentration at each time point, total and per dose
- `doses.csv`: Dose list
- `summary.json`: Parameters and curve endpoints
"#,
        summary.generated_at.to_rfc3339(),
        summary.metabolism,
        params.describe(),
        summary.total.cmax,
        summary.total.tmax.map(|t| format!("{}h", t)).unwrap_or_else(|| "-".to_string()),
        summary.total.auc,
        summary.n_time_points,
        dose_rows,
    );

    std::fs::write(path, report_content)?;
    Ok(())
}
