use super::schema::{ExtractionSchema, TokenRule};
use crate::domain::errors::ExtractionError;
use crate::domain::miner::RawMinerRecord;
use scraper::{Html, Selector};
use tracing::debug;

/// Number of sector values expected in the sectors region
const SECTOR_VALUES: usize = 4;

struct CompiledRegion {
    name: &'static str,
    source: String,
    selector: Selector,
    rule: TokenRule,
}

impl CompiledRegion {
    fn compile(
        name: &'static str,
        source: &str,
        rule: TokenRule,
    ) -> Result<Self, ExtractionError> {
        let selector = Selector::parse(source).map_err(|e| ExtractionError::InvalidSelector {
            region: name,
            selector: source.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self {
            name,
            source: source.to_string(),
            selector,
            rule,
        })
    }

    /// Applies the region rule. Never returns an empty vector on success.
    fn tokens(&self, document: &Html) -> Result<Vec<String>, ExtractionError> {
        let mut matches = document.select(&self.selector).peekable();
        if matches.peek().is_none() {
            return Err(ExtractionError::MissingRegion {
                region: self.name,
                selector: self.source.clone(),
            });
        }

        let tokens: Vec<String> = match self.rule {
            TokenRule::FirstToken | TokenRule::LastToken => {
                let text: String = matches.next().map(|el| el.text().collect()).unwrap_or_default();
                let mut words = text.split_whitespace();
                let word = if self.rule == TokenRule::FirstToken {
                    words.next()
                } else {
                    words.next_back()
                };
                word.map(str::to_string).into_iter().collect()
            }
            TokenRule::DigitRuns => matches
                .filter_map(|el| leading_digit_run(&el.text().collect::<String>()))
                .collect(),
        };

        if tokens.is_empty() {
            return Err(ExtractionError::EmptyToken { region: self.name });
        }
        Ok(tokens)
    }
}

/// First run of `digit (digit | ',')*` in `text`, with the commas removed.
pub fn leading_digit_run(text: &str) -> Option<String> {
    let start = text.find(|c: char| c.is_ascii_digit())?;
    Some(
        text[start..]
            .chars()
            .take_while(|c| c.is_ascii_digit() || *c == ',')
            .filter(|c| *c != ',')
            .collect(),
    )
}

/// Pulls the six raw metrics out of an explorer page.
pub struct MetricExtractor {
    power: CompiledRegion,
    win_count: CompiledRegion,
    sectors: CompiledRegion,
}

impl MetricExtractor {
    /// Compiles every selector up front so a bad schema fails before any fetch.
    pub fn new(schema: &ExtractionSchema) -> Result<Self, ExtractionError> {
        let [power, win_count, sectors] = schema
            .regions()
            .map(|(name, region)| CompiledRegion::compile(name, &region.selector, region.rule));
        Ok(Self {
            power: power?,
            win_count: win_count?,
            sectors: sectors?,
        })
    }

    /// Extracts a complete record or fails; partial records are never returned.
    pub fn extract(
        &self,
        document: &Html,
        address: &str,
    ) -> Result<RawMinerRecord, ExtractionError> {
        let adjusted_power = first(self.power.tokens(document)?);
        let win_count = first(self.win_count.tokens(document)?);

        let sectors = self.sectors.tokens(document)?;
        if sectors.len() < SECTOR_VALUES {
            return Err(ExtractionError::InsufficientSectors {
                expected: SECTOR_VALUES,
                found: sectors.len(),
            });
        }
        let mut sectors = sectors.into_iter();
        let mut next_sector = || sectors.next().unwrap_or_default();

        let record = RawMinerRecord {
            address: address.to_string(),
            adjusted_power,
            win_count,
            sector_total: next_sector(),
            sector_active: next_sector(),
            sector_faults: next_sector(),
            sector_recoveries: next_sector(),
        };

        debug!("Extracted raw metrics for {}: {:?}", address, record);
        Ok(record)
    }

    /// Parses `content` as HTML and extracts from it.
    pub fn extract_from_html(
        &self,
        content: &str,
        address: &str,
    ) -> Result<RawMinerRecord, ExtractionError> {
        let document = Html::parse_document(content);
        self.extract(&document, address)
    }
}

impl Default for MetricExtractor {
    fn default() -> Self {
        // The built-in selectors are static and known to parse
        Self::new(&ExtractionSchema::default()).expect("default extraction schema must compile")
    }
}

fn first(tokens: Vec<String>) -> String {
    tokens.into_iter().next().unwrap_or_default()
}
