// Plain-text presentation of the list and detail view-models.

use crate::core::detail::{DetailState, DetailViewModel, RecordView};
use crate::core::listing::{ListViewModel, PageView};
use crate::core::pagination::{self, PageItem};
use crate::utils::error::Result;
use std::io::Write;

pub const EMPTY_LIST_MESSAGE: &str = "No institutions found";
pub const EMPTY_LIST_HINT: &str = "Try adjusting your search criteria";
pub const NOT_FOUND_MESSAGE: &str = "School not found";
pub const NO_ADMISSION_DATA_MESSAGE: &str = "No admission data available for this year.";
pub const LOADING_MESSAGE: &str = "Loading institutions...";

const MISSING: &str = "-";
const NO_RANK: &str = "—";

/// `12345` -> `12,345`; absent counts render as `-`.
pub fn format_count(value: Option<i64>) -> String {
    let Some(value) = value else {
        return MISSING.to_string();
    };

    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if value < 0 {
        grouped.insert(0, '-');
    }
    grouped
}

fn table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }

    let line = |cells: Vec<&str>| -> String {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| {
                let pad = width - cell.chars().count();
                format!("{}{}", cell, " ".repeat(pad))
            })
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut out = vec![line(headers.to_vec())];
    out.push(
        widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("  "),
    );
    for row in rows {
        out.push(line(row.iter().map(String::as_str).collect()));
    }
    out.join("\n")
}

pub fn render_pagination(current: usize, total: usize) -> String {
    if total <= 1 {
        return String::new();
    }

    let mut parts = Vec::new();
    parts.push(if pagination::has_previous(current) {
        "← Previous".to_string()
    } else {
        "(← Previous)".to_string()
    });
    for item in pagination::generate(current, total) {
        parts.push(match item {
            PageItem::Page(n) if n == current => format!("[{}]", n),
            other => other.to_string(),
        });
    }
    parts.push(if pagination::has_next(current, total) {
        "Next →".to_string()
    } else {
        "(Next →)".to_string()
    });
    parts.join(" ")
}

fn page_rows(page: &PageView<'_>) -> Vec<Vec<String>> {
    page.rows()
        .into_iter()
        .map(|row| {
            let school = row.institution;
            vec![
                school.name.clone(),
                school.rank_type.clone().unwrap_or_else(|| NO_RANK.to_string()),
                school
                    .rank_2025
                    .map(|r| format!("#{}", r))
                    .unwrap_or_else(|| NO_RANK.to_string()),
                row.overall_rate.to_string(),
                row.international_rate.to_string(),
            ]
        })
        .collect()
}

pub fn render_list(vm: &ListViewModel) -> String {
    if vm.is_loading() {
        return LOADING_MESSAGE.to_string();
    }

    let page = vm.page();
    if page.total_count == 0 {
        return format!("{}\n{}", EMPTY_LIST_MESSAGE, EMPTY_LIST_HINT);
    }

    let shown = match &page.range {
        Some(range) => format!("{}-{}", range.start(), range.end()),
        None => "0-0".to_string(),
    };
    let mut out = vec![format!(
        "Showing {} of {} institutions    Page {} of {}",
        shown, page.total_count, page.current_page, page.total_pages
    )];
    out.push(table(
        &[
            "Institution Name",
            "Category",
            "Rank",
            "Overall Rate",
            "International Rate",
        ],
        &page_rows(&page),
    ));

    let bar = render_pagination(page.current_page, page.total_pages);
    if !bar.is_empty() {
        out.push(bar);
    }
    out.join("\n\n")
}

fn record_table(current: &RecordView<'_>) -> String {
    let r = current.record;
    let rows = vec![
        vec![
            "Applicants".to_string(),
            format_count(r.total_applicants),
            format_count(r.applicants_international),
        ],
        vec![
            "Admitted".to_string(),
            format_count(r.total_admitted),
            format_count(r.admitted_international),
        ],
        vec![
            "Enrolled".to_string(),
            format_count(r.total_enrolled),
            format_count(r.enrolled_international),
        ],
        vec![
            "Acceptance Rate".to_string(),
            current.overall_rate.to_string(),
            current.international_rate.to_string(),
        ],
    ];
    table(&["Metric", "Total", "International"], &rows)
}

fn history_table(history: &[RecordView<'_>]) -> String {
    let rows: Vec<Vec<String>> = history
        .iter()
        .map(|view| {
            vec![
                view.record.academic_year.clone(),
                format_count(view.record.total_applicants),
                format_count(view.record.total_admitted),
                view.overall_rate.to_string(),
                view.international_rate.to_string(),
            ]
        })
        .collect();
    table(
        &[
            "Academic Year",
            "Applicants",
            "Admitted",
            "Acceptance Rate",
            "International Rate",
        ],
        &rows,
    )
}

pub fn render_detail_view(vm: &DetailViewModel) -> String {
    let school = vm.institution();
    let mut out = Vec::new();

    let mut header = school.name.clone();
    if let Some(location) = &school.city_state_zip {
        header.push('\n');
        header.push_str(location);
    }
    if let Some(site) = &school.website_url {
        header.push('\n');
        header.push_str(site);
    }
    out.push(header);

    match vm.current() {
        Some(current) => {
            out.push(format!(
                "Admission Statistics ({})\n{}",
                current.record.academic_year,
                record_table(&current)
            ));
            let history = vm.historical();
            if !history.is_empty() {
                out.push(format!("Previous Years\n{}", history_table(&history)));
            }
        }
        None => out.push(format!("Admission Statistics\n{}", NO_ADMISSION_DATA_MESSAGE)),
    }

    out.join("\n\n")
}

pub fn render_detail(state: &DetailState) -> String {
    match state {
        DetailState::Found(vm) => render_detail_view(vm),
        DetailState::NotFound => NOT_FOUND_MESSAGE.to_string(),
    }
}

/// Writes one page as delimited text (`b','` for CSV, `b'\t'` for TSV).
pub fn write_page_delimited<W: Write>(page: &PageView<'_>, delimiter: u8, writer: W) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(writer);

    wtr.write_record([
        "institution_id",
        "name",
        "city_state_zip",
        "rank_2025",
        "rank_type",
        "overall_rate",
        "international_rate",
    ])?;

    for row in page.rows() {
        let school = row.institution;
        wtr.write_record([
            school.institution_id.clone(),
            school.name.clone(),
            school.city_state_zip.clone().unwrap_or_default(),
            school.rank_2025.map(|r| r.to_string()).unwrap_or_default(),
            school.rank_type.clone().unwrap_or_default(),
            row.overall_rate.to_string(),
            row.international_rate.to_string(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{AdmissionRecord, Institution, InstitutionDetail};

    fn school(name: &str, rank: Option<u32>) -> Institution {
        Institution {
            institution_id: name.to_lowercase().replace(' ', "-"),
            name: name.to_string(),
            city_state_zip: Some("Boston, MA".to_string()),
            website_url: None,
            rank_2025: rank,
            rank_type: rank.map(|_| "National Universities".to_string()),
            total_applicants: Some(2000),
            total_admitted: Some(500),
            applicants_international: Some(0),
            admitted_international: Some(0),
        }
    }

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(None), "-");
        assert_eq!(format_count(Some(0)), "0");
        assert_eq!(format_count(Some(999)), "999");
        assert_eq!(format_count(Some(1000)), "1,000");
        assert_eq!(format_count(Some(54008)), "54,008");
        assert_eq!(format_count(Some(1234567)), "1,234,567");
        assert_eq!(format_count(Some(-1234)), "-1,234");
    }

    #[test]
    fn test_empty_list_message() {
        let mut vm = ListViewModel::new();
        vm.apply_results(Vec::new());
        let text = render_list(&vm);
        assert!(text.contains(EMPTY_LIST_MESSAGE));
        assert!(!text.contains("Page"));
    }

    #[test]
    fn test_loading_message() {
        let mut vm = ListViewModel::new();
        vm.begin_loading();
        assert_eq!(render_list(&vm), LOADING_MESSAGE);
    }

    #[test]
    fn test_list_table() {
        let mut vm = ListViewModel::new();
        vm.apply_results(vec![
            school("Boston College", Some(37)),
            school("Berklee College", None),
        ]);
        let text = render_list(&vm);
        assert!(text.contains("Showing 1-2 of 2 institutions"));
        assert!(text.contains("Page 1 of 1"));
        assert!(text.contains("#37"));
        assert!(text.contains("25.0%"));
        assert!(text.contains("N/A"));
        assert!(!text.contains("Previous"));
    }

    #[test]
    fn test_zero_rank_from_api_renders_as_unranked() {
        let school: Institution = serde_json::from_value(serde_json::json!({
            "institution_id": "9",
            "name": "Quiet College",
            "rank_2025": 0
        }))
        .unwrap();
        let mut vm = ListViewModel::new();
        vm.apply_results(vec![school]);

        let text = render_list(&vm);
        assert!(!text.contains("#0"));
        assert!(text.contains(NO_RANK));
    }

    #[test]
    fn test_pagination_bar() {
        assert_eq!(render_pagination(1, 1), "");
        assert_eq!(
            render_pagination(5, 10),
            "← Previous 1 ... 3 4 [5] 6 7 ... 10 Next →"
        );
        assert_eq!(render_pagination(1, 2), "(← Previous) [1] 2 Next →");
    }

    #[test]
    fn test_detail_rendering() {
        let detail = InstitutionDetail {
            institution_id: "164924".to_string(),
            name: "Boston College".to_string(),
            city_state_zip: Some("Chestnut Hill, MA".to_string()),
            website_url: None,
            admission_data: vec![
                AdmissionRecord {
                    academic_year: "2024-2025".to_string(),
                    total_applicants: Some(2000),
                    total_admitted: Some(500),
                    total_enrolled: None,
                    applicants_international: None,
                    admitted_international: None,
                    enrolled_international: None,
                },
                AdmissionRecord {
                    academic_year: "2023-2024".to_string(),
                    total_applicants: Some(40000),
                    total_admitted: Some(6000),
                    total_enrolled: Some(2300),
                    applicants_international: Some(3000),
                    admitted_international: Some(150),
                    enrolled_international: Some(80),
                },
            ],
        };
        let text = render_detail(&DetailState::Found(DetailViewModel::new(detail)));
        assert!(text.contains("Admission Statistics (2024-2025)"));
        assert!(text.contains("2,000"));
        assert!(text.contains("25.0%"));
        assert!(text.contains("Previous Years"));
        assert!(text.contains("2023-2024"));
        assert!(text.contains("15.0%"));

        assert_eq!(render_detail(&DetailState::NotFound), NOT_FOUND_MESSAGE);
    }

    #[test]
    fn test_detail_without_records() {
        let detail = InstitutionDetail {
            institution_id: "1".to_string(),
            name: "New College".to_string(),
            city_state_zip: None,
            website_url: None,
            admission_data: Vec::new(),
        };
        let text = render_detail(&DetailState::Found(DetailViewModel::new(detail)));
        assert!(text.contains(NO_ADMISSION_DATA_MESSAGE));
    }

    #[test]
    fn test_csv_export() {
        let mut vm = ListViewModel::new();
        vm.apply_results(vec![school("Boston College", Some(37))]);

        let mut buf = Vec::new();
        write_page_delimited(&vm.page(), b',', &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some("institution_id,name,city_state_zip,rank_2025,rank_type,overall_rate,international_rate")
        );
        assert_eq!(
            lines.next(),
            Some("boston-college,Boston College,\"Boston, MA\",37,National Universities,25.0%,N/A")
        );
    }
}
