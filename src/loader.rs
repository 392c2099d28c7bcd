//! Case/image association loader
//!
//! Builds the token catalog from two flat CSV inputs: a fraud case export
//! (possibly several rows per case) and a token metadata export whose `data`
//! column carries an embedded JSON blob with media links. Both passes are
//! pure, deterministic, single-pass transforms.

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use crate::model::TokenRecord;

#[derive(Debug, thiserror::Error)]
pub enum LoaderError {
    #[error("failed to open {path}: {source}")]
    Open {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to read CSV row: {0}")]
    Csv(#[from] csv::Error),
}

/// Consumed columns of the case file; any extra columns are ignored
#[derive(Debug, Deserialize)]
struct CaseRow {
    organization_name: String,
    chain: String,
    contract_address: String,
    token_id: String,
    token_status: String,
    case_id: String,
    report_status: String,
}

/// Consumed columns of the token metadata file
#[derive(Debug, Deserialize)]
struct MetadataRow {
    contract_chain: String,
    contract_address: String,
    token_id: String,
    data: Option<String>,
}

/// A deduplicated case row, before image association
#[derive(Debug, Clone, PartialEq)]
pub struct CaseRecord {
    pub organization_name: String,
    pub chain: String,
    pub contract_address: String,
    pub token_id: String,
    pub token_status: String,
    pub case_id: String,
    pub report_status: String,
}

impl CaseRecord {
    fn sort_key(&self) -> (&str, &str, &str) {
        (&self.chain, &self.contract_address, &self.token_id)
    }
}

impl From<CaseRow> for CaseRecord {
    fn from(row: CaseRow) -> Self {
        Self {
            organization_name: row.organization_name,
            chain: row.chain,
            contract_address: row.contract_address,
            token_id: row.token_id,
            token_status: row.token_status,
            case_id: row.case_id,
            report_status: row.report_status,
        }
    }
}

/// Collapse the case export to one row per `case_id`
///
/// Among rows sharing a case id, the one with the lexicographically smallest
/// `(chain, contract_address, token_id)` tuple wins. Output preserves the
/// first-seen order of case ids, so a token index is stable across reloads of
/// identical input.
pub fn dedupe_cases<R: Read>(reader: R) -> Result<Vec<CaseRecord>, LoaderError> {
    let mut rows = csv::Reader::from_reader(reader);
    let mut cases: Vec<CaseRecord> = Vec::new();
    let mut slot_by_case_id: HashMap<String, usize> = HashMap::new();

    for row in rows.deserialize::<CaseRow>() {
        let record = CaseRecord::from(row?);
        match slot_by_case_id.get(&record.case_id) {
            Some(&slot) => {
                if record.sort_key() < cases[slot].sort_key() {
                    cases[slot] = record;
                }
            }
            None => {
                slot_by_case_id.insert(record.case_id.clone(), cases.len());
                cases.push(record);
            }
        }
    }

    Ok(cases)
}

/// Index `(chain, contract_address, token_id)` to preview URL from the
/// metadata export
///
/// Rows whose embedded JSON is malformed, or that carry no
/// `media.preview_url`, contribute nothing; that is the best-effort policy
/// for this input, not an error.
pub fn index_preview_urls<R: Read>(
    reader: R,
) -> Result<HashMap<(String, String, String), String>, LoaderError> {
    let mut rows = csv::Reader::from_reader(reader);
    let mut previews = HashMap::new();

    for row in rows.deserialize::<MetadataRow>() {
        let row = row?;
        if let Some(url) = extract_preview_url(row.data.as_deref()) {
            previews.insert((row.contract_chain, row.contract_address, row.token_id), url);
        }
    }

    Ok(previews)
}

/// Pull `media.preview_url` out of the embedded JSON blob
fn extract_preview_url(data: Option<&str>) -> Option<String> {
    let data = data?;
    if data.is_empty() {
        return None;
    }

    let parsed: serde_json::Value = serde_json::from_str(data).ok()?;
    let url = parsed.get("media")?.get("preview_url")?.as_str()?;
    if url.is_empty() {
        return None;
    }

    Some(url.to_string())
}

/// Inner join: cases whose key resolves to a preview URL become token records
pub fn associate_token_images(
    cases: Vec<CaseRecord>,
    previews: &HashMap<(String, String, String), String>,
) -> Vec<TokenRecord> {
    cases
        .into_iter()
        .filter_map(|case| {
            let key = (
                case.chain.clone(),
                case.contract_address.clone(),
                case.token_id.clone(),
            );
            previews.get(&key).map(|preview_url| TokenRecord {
                organization_name: case.organization_name,
                chain: case.chain,
                contract_address: case.contract_address,
                token_id: case.token_id,
                token_status: case.token_status,
                case_id: case.case_id,
                report_status: case.report_status,
                preview_url: preview_url.clone(),
            })
        })
        .collect()
}

/// Build the token catalog from the two CSV files
pub fn load_case_tokens(
    case_path: &Path,
    metadata_path: &Path,
) -> Result<Vec<TokenRecord>, LoaderError> {
    let case_file = File::open(case_path).map_err(|source| LoaderError::Open {
        path: case_path.display().to_string(),
        source,
    })?;
    let cases = dedupe_cases(case_file)?;

    let metadata_file = File::open(metadata_path).map_err(|source| LoaderError::Open {
        path: metadata_path.display().to_string(),
        source,
    })?;
    let previews = index_preview_urls(metadata_file)?;

    let tokens = associate_token_images(cases, &previews);

    tracing::debug!(tokens = tokens.len(), "Token catalog assembled");

    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CASE_HEADER: &str =
        "organization_name,chain,contract_address,token_id,token_status,case_id,report_status\n";

    const METADATA_HEADER: &str = "contract_chain,contract_address,token_id,data\n";

    fn case_csv(rows: &[&str]) -> String {
        format!("{}{}\n", CASE_HEADER, rows.join("\n"))
    }

    fn metadata_csv(rows: &[&str]) -> String {
        format!("{}{}\n", METADATA_HEADER, rows.join("\n"))
    }

    #[test]
    fn dedupe_keeps_lexicographically_smallest_tuple() {
        let input = case_csv(&[
            "Acme,eth,0xAB,2,active,case-1,open",
            "Acme,eth,0xAA,5,active,case-1,open",
        ]);

        let cases = dedupe_cases(input.as_bytes()).unwrap();
        assert_eq!(cases.len(), 1);
        assert_eq!(cases[0].contract_address, "0xAA");
        assert_eq!(cases[0].token_id, "5");
    }

    #[test]
    fn dedupe_compares_full_tuple_in_order() {
        // Same chain and contract: token_id breaks the tie lexicographically,
        // so "10" sorts before "9".
        let input = case_csv(&[
            "Acme,eth,0xAA,9,active,case-1,open",
            "Acme,eth,0xAA,10,active,case-1,open",
        ]);

        let cases = dedupe_cases(input.as_bytes()).unwrap();
        assert_eq!(cases.len(), 1);
        assert_eq!(cases[0].token_id, "10");
    }

    #[test]
    fn dedupe_preserves_first_seen_case_order() {
        let input = case_csv(&[
            "Acme,eth,0xCC,1,active,case-2,open",
            "Acme,eth,0xAA,1,active,case-1,open",
            "Acme,eth,0xBB,1,active,case-2,open",
        ]);

        let cases = dedupe_cases(input.as_bytes()).unwrap();
        assert_eq!(cases.len(), 2);
        assert_eq!(cases[0].case_id, "case-2");
        assert_eq!(cases[0].contract_address, "0xBB");
        assert_eq!(cases[1].case_id, "case-1");
    }

    #[test]
    fn dedupe_ignores_extra_columns() {
        let input = format!(
            "organization_name,chain,contract_address,token_id,token_status,case_id,report_status,notes\n{}\n",
            "Acme,eth,0xAA,1,active,case-1,open,irrelevant"
        );

        let cases = dedupe_cases(input.as_bytes()).unwrap();
        assert_eq!(cases.len(), 1);
        assert_eq!(cases[0].organization_name, "Acme");
    }

    #[test]
    fn preview_index_reads_embedded_media_json() {
        let input = metadata_csv(&[
            r#"eth,0xAA,1,"{""media"": {""preview_url"": ""https://img.example/1.png""}}""#,
        ]);

        let previews = index_preview_urls(input.as_bytes()).unwrap();
        let key = ("eth".to_string(), "0xAA".to_string(), "1".to_string());
        assert_eq!(previews.get(&key).unwrap(), "https://img.example/1.png");
    }

    #[test]
    fn malformed_embedded_json_means_no_image() {
        let input = metadata_csv(&[
            r#"eth,0xAA,1,"not json at all""#,
            r#"eth,0xBB,2,"{""media"": {""preview_url"": ""https://img.example/2.png""}}""#,
        ]);

        let previews = index_preview_urls(input.as_bytes()).unwrap();
        assert_eq!(previews.len(), 1);
        let key = ("eth".to_string(), "0xBB".to_string(), "2".to_string());
        assert!(previews.contains_key(&key));
    }

    #[test]
    fn missing_media_or_empty_url_contributes_nothing() {
        let input = metadata_csv(&[
            r#"eth,0xAA,1,"{}""#,
            r#"eth,0xBB,2,"{""media"": {}}""#,
            r#"eth,0xCC,3,"{""media"": {""preview_url"": """"}}""#,
            "eth,0xDD,4,",
        ]);

        let previews = index_preview_urls(input.as_bytes()).unwrap();
        assert!(previews.is_empty());
    }

    #[test]
    fn join_drops_cases_without_a_resolved_preview() {
        let cases = dedupe_cases(
            case_csv(&[
                "Acme,eth,0xAA,1,active,case-1,open",
                "Acme,eth,0xBB,2,active,case-2,open",
            ])
            .as_bytes(),
        )
        .unwrap();

        let previews = index_preview_urls(
            metadata_csv(&[
                r#"eth,0xAA,1,"{""media"": {""preview_url"": ""https://img.example/1.png""}}""#,
                r#"eth,0xBB,2,"{}""#,
            ])
            .as_bytes(),
        )
        .unwrap();

        let tokens = associate_token_images(cases, &previews);
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].case_id, "case-1");
        assert_eq!(tokens[0].preview_url, "https://img.example/1.png");
    }

    #[test]
    fn join_matches_on_the_full_key() {
        let cases = dedupe_cases(
            case_csv(&["Acme,eth,0xAA,1,active,case-1,open"]).as_bytes(),
        )
        .unwrap();

        // Same contract and token on a different chain must not match.
        let previews = index_preview_urls(
            metadata_csv(&[
                r#"polygon,0xAA,1,"{""media"": {""preview_url"": ""https://img.example/1.png""}}""#,
            ])
            .as_bytes(),
        )
        .unwrap();

        let tokens = associate_token_images(cases, &previews);
        assert!(tokens.is_empty());
    }
}
