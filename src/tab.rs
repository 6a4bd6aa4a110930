mod config_reader;
mod io_common;
mod io_excel;

use log::{debug, info, warn};

use ahp_priorities::builder::Builder;
use ahp_priorities::*;
use snafu::{prelude::*, Snafu};

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::json;
use serde_json::Map as JSMap;
use serde_json::Value as JSValue;
use text_diff::print_diff;

use crate::args::Args;
use crate::tab::config_reader::*;
use crate::tab::io_excel::*;

#[derive(Debug, Snafu)]
pub enum TabError {
    #[snafu(display("Error opening file {path}"))]
    OpeningExcel {
        source: calamine::XlsxError,
        path: String,
    },
    #[snafu(display("Worksheet {name} is listed but could not be found"))]
    MissingWorksheet { name: String },
    #[snafu(display("Error opening file {path}"))]
    OpeningJson {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error parsing JSON"))]
    ParsingJson { source: serde_json::Error },
    #[snafu(display("Error writing file {path}"))]
    WritingOutput {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Sheet {sheet}, row {lineno}: cannot understand cell {content}"))]
    ExcelWrongCellType {
        sheet: String,
        lineno: u64,
        content: String,
    },
    #[snafu(display("Sheet {sheet}, row {lineno}: unknown judgment {symbol:?}"))]
    UnknownJudgment {
        sheet: String,
        lineno: u64,
        symbol: String,
    },
    #[snafu(display("No input workbook: use --input or the inputFile field of the configuration"))]
    MissingInput {},
    #[snafu(display("The configuration file has no parent directory"))]
    MissingParentDir {},
    #[snafu(display("Sheet {sheet}: {source}"))]
    BuildingModel { source: ModelError, sheet: String },
    #[snafu(display("Error while computing priorities: {source}"))]
    Computing { source: ModelError },
    #[snafu(display("Difference detected between computed priorities and reference {path}"))]
    ReferenceMismatch { path: String },

    #[snafu(whatever, display("{message}"))]
    Whatever {
        message: String,
        #[snafu(source(from(Box<dyn std::error::Error>, Some)))]
        source: Option<Box<dyn std::error::Error>>,
    },
}

pub type TabResult<T> = Result<T, TabError>;
pub type BTabResult<T> = Result<T, Box<TabError>>;

/// Everything needed for one computation, once the configuration file and the
/// command line are merged.
#[derive(PartialEq, Debug, Clone)]
pub struct TabSettings {
    pub input: String,
    pub info_sheet: String,
    pub out: Option<String>,
    pub rules: ScaleRules,
}

const DEFAULT_INFO_SHEET: &str = "info";

fn resolve_path(root: &Path, p: &str) -> String {
    root.join(p).display().to_string()
}

/// Merges the configuration (if any) and the command line. The command line wins.
pub fn resolve_settings(args: &Args, config: Option<(&TabConfig, &Path)>) -> TabResult<TabSettings> {
    let config_input = config.and_then(|(c, root)| {
        c.input_file
            .as_ref()
            .map(|p| resolve_path(root, p.as_str()))
    });
    let input = args
        .input
        .clone()
        .or(config_input)
        .context(MissingInputSnafu {})?;

    let info_sheet = args
        .info_sheet
        .clone()
        .or_else(|| config.and_then(|(c, _)| c.info_sheet_name.clone()))
        .unwrap_or_else(|| DEFAULT_INFO_SHEET.to_string());

    let config_out = config.and_then(|(c, root)| {
        c.output_file.as_ref().map(|p| match p.as_str() {
            "stdout" => p.clone(),
            _ => resolve_path(root, p.as_str()),
        })
    });
    let out = args.out.clone().or(config_out);

    let mut rules = match config {
        Some((c, _)) => c.scale_rules(&ScaleRules::DEFAULT_RULES),
        None => ScaleRules::DEFAULT_RULES,
    };
    rules.moderate = args.moderate.unwrap_or(rules.moderate);
    rules.strong = args.strong.unwrap_or(rules.strong);
    rules.tolerance = args.tolerance.unwrap_or(rules.tolerance);
    rules.max_iterations = args.max_iterations.unwrap_or(rules.max_iterations);
    validate_rules(&rules)?;

    Ok(TabSettings {
        input,
        info_sheet,
        out,
        rules,
    })
}

/// Fills a model with the content of a workbook.
pub fn build_model(data: &WorkbookData, rules: &ScaleRules) -> TabResult<PairwiseModel> {
    let mut builder = Builder::new(rules);
    for sheet in data.users.iter() {
        builder
            .add_user(&sheet.name)
            .context(BuildingModelSnafu { sheet: &sheet.name })?;
        for row in sheet.judgments.iter() {
            builder
                .add_judgment(&sheet.name, &row.alt1, row.judgment, &row.alt2)
                .context(BuildingModelSnafu { sheet: &sheet.name })?;
        }
    }
    let mut model = builder.build();
    model.set_groups(data.groups.clone());
    info!(
        "Built model: {} alternatives, {} users",
        model.num_alternatives(),
        model.users().len()
    );
    Ok(model)
}

fn scores_to_json(priorities: &[f64]) -> JSValue {
    json!(priorities)
}

pub fn calcs_to_json(calcs: &AllCalcs) -> JSValue {
    let mut user_scores: JSMap<String, JSValue> = JSMap::new();
    for (user, priorities) in calcs.user_scores.iter() {
        user_scores.insert(user.clone(), scores_to_json(priorities));
    }

    let mut groups: JSMap<String, JSValue> = JSMap::new();
    for attr in calcs.groups.attributes() {
        let mut subgroups: JSMap<String, JSValue> = JSMap::new();
        for sg in attr.subgroups.iter() {
            subgroups.insert(sg.value.clone(), json!(sg.members));
        }
        groups.insert(attr.name.clone(), JSValue::Object(subgroups));
    }

    let mut group_scores: JSMap<String, JSValue> = JSMap::new();
    for gs in calcs.group_scores.iter() {
        let mut subgroups: JSMap<String, JSValue> = JSMap::new();
        for sg in gs.subgroups.iter() {
            subgroups.insert(sg.value.clone(), scores_to_json(&sg.priorities));
        }
        group_scores.insert(gs.attribute.clone(), JSValue::Object(subgroups));
    }

    json!({
        "alternatives": calcs.alternatives,
        "users": calcs.users,
        "userScores": user_scores,
        "groups": groups,
        "groupScores": group_scores,
    })
}

fn write_output(out: &Option<String>, pretty_js: &str) -> BTabResult<()> {
    match out.as_deref() {
        None | Some("stdout") | Some("") => {
            println!("{}", pretty_js);
        }
        Some(path) => {
            info!("Writing priorities to {:?}", path);
            fs::write(path, pretty_js).context(WritingOutputSnafu { path })?;
        }
    }
    Ok(())
}

/// Compares the output with a reference output.
fn check_reference(reference_path: &str, pretty_js: &str) -> BTabResult<()> {
    let summary_ref = read_summary(reference_path)?;
    debug!("reference: {:?}", summary_ref);
    let pretty_js_ref = serde_json::to_string_pretty(&summary_ref).context(ParsingJsonSnafu {})?;
    if pretty_js_ref != pretty_js {
        warn!("Found differences with the reference string");
        print_diff(pretty_js_ref.as_str(), pretty_js, "\n");
        return Err(Box::new(TabError::ReferenceMismatch {
            path: reference_path.to_string(),
        }));
    }
    Ok(())
}

pub fn run_computation(args: &Args) -> BTabResult<()> {
    let config: Option<(TabConfig, PathBuf)> = match &args.config {
        Some(config_path) => {
            let c = read_config(config_path)?;
            info!("config: {:?}", c);
            let root = Path::new(config_path.as_str())
                .parent()
                .context(MissingParentDirSnafu {})?
                .to_path_buf();
            Some((c, root))
        }
        None => None,
    };

    let settings = resolve_settings(args, config.as_ref().map(|(c, p)| (c, p.as_path())))?;
    info!("settings: {:?}", settings);

    let data = read_workbook(&settings.input, &settings.info_sheet)?;
    let model = build_model(&data, &settings.rules)?;
    let calcs = model.all_calcs().context(ComputingSnafu {})?;

    let result_js = calcs_to_json(&calcs);
    let pretty_js = serde_json::to_string_pretty(&result_js).context(ParsingJsonSnafu {})?;
    write_output(&settings.out, &pretty_js)?;

    if let Some(reference_path) = &args.reference {
        check_reference(reference_path, &pretty_js)?;
    }

    Ok(())
}
