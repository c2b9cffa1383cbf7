//! Command payloads and how they are written to stdout.
//!
//! JSON has no NaN or infinity, so non-finite values are written as the
//! strings `"nan"`, `"inf"` and `"-inf"`.

use std::io::Write;

use clap::ValueEnum;
use sd_math::{Dist, DistInfo};
use serde::ser::SerializeSeq;
use serde::{Deserialize, Serialize, Serializer};

use crate::error::Result;

/// Output format for command payloads.
#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Aligned plain text
    #[default]
    Human,
    /// Pretty-printed JSON
    Json,
}

impl OutputFormat {
    /// Looks for `--format json` / `-f json` in raw arguments.
    ///
    /// Used when clap rejects the command line, so errors can still honor
    /// the requested format.
    pub fn requested_in<S: AsRef<str>>(args: &[S]) -> Option<OutputFormat> {
        let mut found = None;
        let mut iter = args.iter().map(AsRef::as_ref);
        while let Some(arg) = iter.next() {
            let value = match arg {
                "--format" | "-f" => iter.next(),
                _ => arg
                    .strip_prefix("--format=")
                    .or_else(|| arg.strip_prefix("-f="))
                    .or_else(|| arg.strip_prefix("-f").filter(|v| !v.is_empty())),
            };
            if let Some(value) = value {
                if let Ok(format) = OutputFormat::from_str(value, true) {
                    found = Some(format);
                }
            }
        }
        found
    }
}

/// Human rendering options.
#[derive(Debug, Clone, Copy, Default)]
pub struct HumanStyle {
    /// Fixed digits after the decimal point; shortest round-trip form when `None`.
    pub precision: Option<usize>,
}

impl HumanStyle {
    pub fn number(&self, value: f64) -> String {
        if !value.is_finite() {
            return label(value).to_string();
        }
        match self.precision {
            Some(digits) => format!("{value:.digits$}"),
            None => format!("{value}"),
        }
    }
}

fn label(value: f64) -> &'static str {
    if value.is_nan() {
        "nan"
    } else if value > 0.0 {
        "inf"
    } else {
        "-inf"
    }
}

#[derive(Serialize)]
#[serde(untagged)]
enum JsonNumber {
    Finite(f64),
    Label(&'static str),
}

impl From<f64> for JsonNumber {
    fn from(value: f64) -> Self {
        if value.is_finite() {
            JsonNumber::Finite(value)
        } else {
            JsonNumber::Label(label(value))
        }
    }
}

fn finite_or_label<S: Serializer>(value: &f64, serializer: S) -> std::result::Result<S::Ok, S::Error> {
    JsonNumber::from(*value).serialize(serializer)
}

fn finite_or_label_seq<S: Serializer>(
    values: &[f64],
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    let mut seq = serializer.serialize_seq(Some(values.len()))?;
    for value in values {
        seq.serialize_element(&JsonNumber::from(*value))?;
    }
    seq.end()
}

fn finite_or_label_rows<S: Serializer>(
    rows: &[Vec<f64>],
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    let mut seq = serializer.serialize_seq(Some(rows.len()))?;
    for row in rows {
        let row: Vec<JsonNumber> = row.iter().map(|v| JsonNumber::from(*v)).collect();
        seq.serialize_element(&row)?;
    }
    seq.end()
}

/// Which function an [`Evaluation`] applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Function {
    Pdf,
    LogPdf,
    Cdf,
    Quantile,
}

impl Function {
    pub fn as_str(self) -> &'static str {
        match self {
            Function::Pdf => "pdf",
            Function::LogPdf => "log_pdf",
            Function::Cdf => "cdf",
            Function::Quantile => "quantile",
        }
    }
}

/// One point of an evaluation.
#[derive(Debug, Clone, Serialize)]
pub struct Point {
    #[serde(serialize_with = "finite_or_label")]
    pub input: f64,
    #[serde(serialize_with = "finite_or_label")]
    pub value: f64,
}

/// `pdf`, `cdf` and `quantile` results.
#[derive(Debug, Clone, Serialize)]
pub struct Evaluation {
    pub distribution: Dist,
    pub function: Function,
    pub points: Vec<Point>,
}

/// Draws from `sample`, as a flat vector or a row-major matrix.
#[derive(Debug, Clone, Serialize)]
pub struct Samples {
    pub distribution: Dist,
    /// Seed the draws were generated from; pass it back to reproduce them.
    pub seed: u64,
    pub shape: Vec<usize>,
    pub values: SampleValues,
}

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum SampleValues {
    Vector(#[serde(serialize_with = "finite_or_label_seq")] Vec<f64>),
    Matrix(#[serde(serialize_with = "finite_or_label_rows")] Vec<Vec<f64>>),
}

/// Mean and variance from `summary`.
#[derive(Debug, Clone, Serialize)]
pub struct Summary {
    pub distribution: Dist,
    pub support: &'static str,
    #[serde(serialize_with = "finite_or_label")]
    pub mean: f64,
    #[serde(serialize_with = "finite_or_label")]
    pub variance: f64,
}

/// Everything a command can print.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Report {
    Evaluation(Evaluation),
    Samples(Samples),
    Summary(Summary),
    Catalog(Vec<DistInfo>),
}

fn describe(dist: &Dist) -> String {
    let info = dist.info();
    let params = info
        .params
        .iter()
        .zip(dist.params())
        .map(|(name, value)| format!("{name}={value}"))
        .collect::<Vec<_>>()
        .join(", ");
    format!("{}({})", info.name, params)
}

impl Report {
    /// Plain-text rendering, one line per value.
    pub fn render_human(&self, style: HumanStyle) -> String {
        let mut out = String::new();
        match self {
            Report::Evaluation(eval) => {
                out.push_str(&format!("{} {}\n", describe(&eval.distribution), eval.function.as_str()));
                let column = if eval.function == Function::Quantile { "p" } else { "x" };
                for point in &eval.points {
                    out.push_str(&format!(
                        "{column} = {}\t{}\n",
                        style.number(point.input),
                        style.number(point.value)
                    ));
                }
            }
            Report::Samples(samples) => {
                out.push_str(&format!("{} seed={}\n", describe(&samples.distribution), samples.seed));
                match &samples.values {
                    SampleValues::Vector(values) => {
                        for value in values {
                            out.push_str(&style.number(*value));
                            out.push('\n');
                        }
                    }
                    SampleValues::Matrix(rows) => {
                        for row in rows {
                            let line = row.iter().map(|v| style.number(*v)).collect::<Vec<_>>();
                            out.push_str(&line.join("\t"));
                            out.push('\n');
                        }
                    }
                }
            }
            Report::Summary(summary) => {
                out.push_str(&format!("{}\n", describe(&summary.distribution)));
                out.push_str(&format!("support   {}\n", summary.support));
                out.push_str(&format!("mean      {}\n", style.number(summary.mean)));
                out.push_str(&format!("variance  {}\n", style.number(summary.variance)));
            }
            Report::Catalog(entries) => {
                for info in entries {
                    let mut line = format!("{:<12} ({})  support {}", info.name, info.params.join(", "), info.support);
                    if !info.aliases.is_empty() {
                        line.push_str(&format!("  aliases: {}", info.aliases.join(", ")));
                    }
                    out.push_str(&line);
                    out.push('\n');
                }
            }
        }
        out
    }

    /// Writes the report in `format` to `writer`.
    pub fn write_to<W: Write>(&self, writer: &mut W, format: OutputFormat, style: HumanStyle) -> Result<()> {
        match format {
            OutputFormat::Json => {
                serde_json::to_writer_pretty(&mut *writer, self)?;
                writeln!(writer)?;
            }
            OutputFormat::Human => {
                writer.write_all(self.render_human(style).as_bytes())?;
            }
        }
        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reciprocal() -> Dist {
        Dist::from_name("reciprocal", &[2.0, 30.0]).unwrap()
    }

    #[test]
    fn non_finite_values_become_labels() {
        let report = Report::Evaluation(Evaluation {
            distribution: Dist::from_name("exponential", &[1.0]).unwrap(),
            function: Function::Quantile,
            points: vec![
                Point { input: 1.0, value: f64::INFINITY },
                Point { input: 2.0, value: f64::NAN },
                Point { input: 0.0, value: 0.0 },
            ],
        });
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["points"][0]["value"], "inf");
        assert_eq!(json["points"][1]["value"], "nan");
        assert_eq!(json["points"][2]["value"], 0.0);
        assert_eq!(json["function"], "quantile");
        assert_eq!(json["distribution"]["distribution"], "exponential");
    }

    #[test]
    fn matrix_samples_serialize_as_nested_arrays() {
        let report = Report::Samples(Samples {
            distribution: reciprocal(),
            seed: 3,
            shape: vec![2, 2],
            values: SampleValues::Matrix(vec![vec![2.0, 3.0], vec![4.0, f64::NAN]]),
        });
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["values"][0][1], 3.0);
        assert_eq!(json["values"][1][1], "nan");
        assert_eq!(json["shape"], serde_json::json!([2, 2]));
    }

    #[test]
    fn format_is_found_in_raw_arguments() {
        assert_eq!(
            OutputFormat::requested_in(&["statdist", "--format", "json", "pdf"]),
            Some(OutputFormat::Json)
        );
        assert_eq!(OutputFormat::requested_in(&["statdist", "-f", "json"]), Some(OutputFormat::Json));
        assert_eq!(OutputFormat::requested_in(&["statdist", "--format=json"]), Some(OutputFormat::Json));
        assert_eq!(OutputFormat::requested_in(&["statdist", "-fjson"]), Some(OutputFormat::Json));
        assert_eq!(
            OutputFormat::requested_in(&["statdist", "-f", "json", "--format", "human"]),
            Some(OutputFormat::Human)
        );
        assert_eq!(OutputFormat::requested_in(&["statdist", "list"]), None);
        assert_eq!(OutputFormat::requested_in(&["statdist", "--format", "xml"]), None);
    }

    #[test]
    fn human_precision_is_applied() {
        let style = HumanStyle { precision: Some(3) };
        assert_eq!(style.number(0.073853874613771), "0.074");
        assert_eq!(style.number(f64::NEG_INFINITY), "-inf");
        assert_eq!(HumanStyle::default().number(0.5), "0.5");
    }

    #[test]
    fn human_summary_names_parameters() {
        let report = Report::Summary(Summary {
            distribution: reciprocal(),
            support: "[a, b], 0 < a < b",
            mean: 1.0,
            variance: 2.0,
        });
        let text = report.render_human(HumanStyle::default());
        assert!(text.starts_with("reciprocal(a=2, b=30)"), "{}", text);
        assert!(text.contains("variance  2"));
    }

    #[test]
    fn json_goes_to_writer() {
        let mut buf = Vec::new();
        Report::Catalog(Dist::catalog().to_vec())
            .write_to(&mut buf, OutputFormat::Json, HumanStyle::default())
            .unwrap();
        let parsed: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(parsed.as_array().unwrap().len(), 6);
    }
}
