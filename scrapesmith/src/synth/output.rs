//! Result serialization at the end of a script.

use super::literals::py_str;
use super::writer::ScriptWriter;
use crate::config::{ExtractionConfig, OutputFormat, OutputSpec, ScrapingMode};

/// Notice printed when a run extracted nothing.
pub const NO_DATA_NOTICE: &str = "No data extracted.";

/// Standard-library module the output block imports, if any.
pub(crate) fn output_import(output: &OutputSpec) -> Option<&'static str> {
    match output.format {
        OutputFormat::Csv => Some("csv"),
        OutputFormat::Json => Some("json"),
        OutputFormat::Print => None,
    }
}

/// Writes the output block over `all_data`.
pub(crate) fn write_output(w: &mut ScriptWriter, extraction: &ExtractionConfig, output: &OutputSpec) {
    let simple = extraction.mode == ScrapingMode::Simple;
    w.block("if not all_data:", |w| {
        w.line(format!("print({})", py_str(NO_DATA_NOTICE)));
    });
    w.block("else:", |w| {
        let Some(file_name) = output.file_name() else {
            write_print(w, simple);
            return;
        };
        w.line("os.makedirs(PROJECT_FOLDER, exist_ok=True)");
        w.line(format!(
            "output_path = os.path.join(PROJECT_FOLDER, {})",
            py_str(file_name)
        ));
        match output.format {
            OutputFormat::Csv => write_csv(w, extraction, simple),
            OutputFormat::Json => write_json(w, extraction, simple),
            OutputFormat::Print => {}
        }
        w.line("print(f\"Saved {len(all_data)} records to {output_path}\")");
    });
}

fn write_csv(w: &mut ScriptWriter, extraction: &ExtractionConfig, simple: bool) {
    w.block(
        "with open(output_path, \"w\", newline=\"\", encoding=\"utf-8\") as handle:",
        |w| {
            if simple {
                w.line("writer = csv.writer(handle)");
                w.line(format!(
                    "writer.writerow([{}])",
                    py_str(&extraction.simple_field.name)
                ));
                w.line("writer.writerows([value] for value in all_data)");
            } else {
                w.line("writer = csv.DictWriter(handle, fieldnames=list(all_data[0].keys()), extrasaction=\"ignore\")");
                w.line("writer.writeheader()");
                w.line("writer.writerows(all_data)");
            }
        },
    );
}

fn write_json(w: &mut ScriptWriter, extraction: &ExtractionConfig, simple: bool) {
    w.block(
        "with open(output_path, \"w\", encoding=\"utf-8\") as handle:",
        |w| {
            if simple {
                w.line(format!(
                    "json.dump({{{}: all_data}}, handle, indent=2, ensure_ascii=False)",
                    py_str(&extraction.simple_field.name)
                ));
            } else {
                w.line("json.dump(all_data, handle, indent=2, ensure_ascii=False)");
            }
        },
    );
}

fn write_print(w: &mut ScriptWriter, simple: bool) {
    w.block("for index, item in enumerate(all_data, start=1):", |w| {
        w.line("print(f\"{index}: {item}\")");
    });
    let noun = if simple { "values" } else { "records" };
    w.line(format!("print(f\"{{len(all_data)}} {noun} extracted.\")"));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selector::{ElementDescriptor, FieldDescriptor};
    use pretty_assertions::assert_eq;

    fn render(extraction: &ExtractionConfig, format: OutputFormat) -> String {
        let mut w = ScriptWriter::new();
        write_output(&mut w, extraction, &OutputSpec::new(format));
        w.finish()
    }

    #[test]
    fn test_empty_result_short_circuits() {
        let extraction = ExtractionConfig::structured(ElementDescriptor::tag("li"));
        for format in [OutputFormat::Csv, OutputFormat::Json, OutputFormat::Print] {
            let script = render(&extraction, format);
            assert!(script.starts_with("if not all_data:\n    print(\"No data extracted.\")\nelse:\n"));
        }
    }

    #[test]
    fn test_record_csv_uses_first_record_keys() {
        let script = render(
            &ExtractionConfig::structured(ElementDescriptor::tag("li")),
            OutputFormat::Csv,
        );
        assert!(script.contains("csv.DictWriter(handle, fieldnames=list(all_data[0].keys())"));
        assert!(script.contains("\"output.csv\""));
        assert!(!script.contains("json.dump"));
    }

    #[test]
    fn test_simple_outputs_single_named_column() {
        let extraction = ExtractionConfig::simple(FieldDescriptor::new("price", "span", ""));
        let csv = render(&extraction, OutputFormat::Csv);
        assert!(csv.contains("writer.writerow([\"price\"])"));
        let json = render(&extraction, OutputFormat::Json);
        assert!(json.contains("json.dump({\"price\": all_data}, handle, indent=2, ensure_ascii=False)"));
    }

    #[test]
    fn test_print_writes_no_file() {
        let script = render(&ExtractionConfig::all_links(), OutputFormat::Print);
        assert!(!script.contains("open("));
        assert!(!script.contains("csv."));
        assert!(!script.contains("json.dump"));
        assert_eq!(
            script,
            "if not all_data:\n\
             \x20   print(\"No data extracted.\")\n\
             else:\n\
             \x20   for index, item in enumerate(all_data, start=1):\n\
             \x20       print(f\"{index}: {item}\")\n\
             \x20   print(f\"{len(all_data)} records extracted.\")\n"
        );
    }

    #[test]
    fn test_output_imports() {
        assert_eq!(output_import(&OutputSpec::new(OutputFormat::Csv)), Some("csv"));
        assert_eq!(output_import(&OutputSpec::new(OutputFormat::Print)), None);
    }
}
