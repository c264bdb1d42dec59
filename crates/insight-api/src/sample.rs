//! The two fixed records written by `POST /init`.

use insight_core::record::RecordDraft;

pub fn sample_drafts() -> Vec<RecordDraft> {
  vec![
    RecordDraft {
      title:      Some("Climate change impacts on agriculture".into()),
      topic:      Some("climate".into()),
      sector:     Some("agriculture".into()),
      region:     Some("North America".into()),
      country:    Some("United States".into()),
      source:     Some("NASA".into()),
      end_year:   Some("2025".into()),
      intensity:  Some(5),
      likelihood: Some(3),
      relevance:  Some(4),
      pest:       Some("Environmental".into()),
      swot:       Some("Threat".into()),
      url:        Some("https://climate.nasa.gov".into()),
    },
    RecordDraft {
      title:      Some("Renewable energy adoption trends".into()),
      topic:      Some("energy".into()),
      sector:     Some("utilities".into()),
      region:     Some("Europe".into()),
      country:    Some("Germany".into()),
      source:     Some("IEA".into()),
      end_year:   Some("2023".into()),
      intensity:  Some(4),
      likelihood: Some(5),
      relevance:  Some(5),
      pest:       Some("Technological".into()),
      swot:       Some("Opportunity".into()),
      url:        Some("https://www.iea.org".into()),
    },
  ]
}
