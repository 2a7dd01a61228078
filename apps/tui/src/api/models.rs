use serde::de::{Deserializer, MapAccess, Visitor};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A JSON object of `label -> number` that keeps the key order of the response.
///
/// The API sends its mappings already sorted (counts descending, days
/// chronologically), so the order is part of the data.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Tally(Vec<(String, f64)>);

impl Tally {
    pub fn from_pairs<I, K>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, f64)>,
        K: Into<String>,
    {
        Self(pairs.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn entries(&self) -> &[(String, f64)] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.0.iter().map(|(_, v)| *v)
    }

    pub fn total(&self) -> f64 {
        self.values().sum()
    }
}

impl<'de> Deserialize<'de> for Tally {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct TallyVisitor;

        impl<'de> Visitor<'de> for TallyVisitor {
            type Value = Tally;

            fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                formatter.write_str("an object mapping labels to numbers")
            }

            fn visit_map<M: MapAccess<'de>>(self, mut map: M) -> Result<Tally, M::Error> {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((key, value)) = map.next_entry::<String, Option<f64>>()? {
                    // null means the backend could not compute a value
                    entries.push((key, value.unwrap_or(0.0)));
                }
                Ok(Tally(entries))
            }
        }

        deserializer.deserialize_map(TallyVisitor)
    }
}

impl Serialize for Tally {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, value) in &self.0 {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// Occurrence counts per biome.
pub type BiomeDistribution = Tally;
/// Occurrence counts per ISO day, chronological.
pub type DailySeries = Tally;
/// Occurrence counts per risk label.
pub type RiskDistribution = Tally;
/// Mean FRP per state.
pub type FrpByState = Tally;

/// `/metricas` payload.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct FireMetrics {
    #[serde(rename = "total_focos")]
    pub total: u64,
    #[serde(rename = "focos_por_estado", default)]
    pub by_state: Tally,
    #[serde(rename = "media_frp", default)]
    pub mean_frp: Option<f64>,
    #[serde(rename = "maior_frp", default)]
    pub max_frp: Option<f64>,
    #[serde(rename = "menor_frp", default)]
    pub min_frp: Option<f64>,
    #[serde(rename = "desvio_frp", default)]
    pub std_dev_frp: Option<f64>,
    #[serde(rename = "total_estados", default)]
    pub total_states: Option<u64>,
    #[serde(rename = "total_biomas", default)]
    pub total_biomes: Option<u64>,
    #[serde(rename = "data_mais_recente", default)]
    pub latest_detection: Option<String>,
}

/// One row of `/focos` or `/alertas`. The backend sends `null` for any
/// column it could not clean up, so every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct FireRecord {
    #[serde(rename = "municipio", default)]
    pub municipality: Option<String>,
    #[serde(rename = "estado", default)]
    pub state: Option<String>,
    #[serde(rename = "bioma", default)]
    pub biome: Option<String>,
    #[serde(rename = "data_hora_gmt", default)]
    pub detected_at: Option<String>,
    #[serde(default)]
    pub frp: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct StateList {
    #[serde(rename = "estados", default)]
    pub states: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct BiomeList {
    #[serde(rename = "biomas", default)]
    pub biomes: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Coverage {
    #[serde(rename = "inicio", default)]
    pub start: Option<String>,
    #[serde(rename = "fim", default)]
    pub end: Option<String>,
}

/// `/status` payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ApiStatus {
    pub status: String,
    #[serde(default)]
    pub dataset_size: u64,
    #[serde(rename = "colunas", default)]
    pub columns: Vec<String>,
    #[serde(rename = "periodo_cobertura", default)]
    pub coverage: Coverage,
    #[serde(rename = "memoria_usage", default)]
    pub memory_usage: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tally_keeps_response_order() -> Result<(), serde_json::Error> {
        let tally: Tally =
            serde_json::from_str(r#"{"2024-01-03": 4, "2024-01-01": 9, "2024-01-02": 1}"#)?;
        let keys: Vec<&str> = tally.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, ["2024-01-03", "2024-01-01", "2024-01-02"]);
        assert!((tally.total() - 14.0).abs() < f64::EPSILON);
        Ok(())
    }

    #[test]
    fn tally_treats_null_as_zero() -> Result<(), serde_json::Error> {
        let tally: Tally = serde_json::from_str(r#"{"PARA": 12.5, "ACRE": null}"#)?;
        assert_eq!(tally.entries()[1], ("ACRE".to_string(), 0.0));
        Ok(())
    }

    #[test]
    fn tally_rejects_arrays() {
        assert!(serde_json::from_str::<Tally>("[1, 2]").is_err());
    }

    #[test]
    fn metrics_accept_minimal_and_full_payloads() -> Result<(), serde_json::Error> {
        let minimal: FireMetrics =
            serde_json::from_str(r#"{"total_focos": 3, "focos_por_estado": {"MT": 2, "PA": 1}}"#)?;
        assert_eq!(minimal.total, 3);
        assert_eq!(minimal.by_state.len(), 2);
        assert_eq!(minimal.mean_frp, None);

        let full: FireMetrics = serde_json::from_str(
            r#"{"total_focos": 10, "focos_por_estado": {}, "media_frp": 21.5,
                "maior_frp": 300.0, "menor_frp": 0.0, "desvio_frp": 4.2,
                "total_estados": 0, "total_biomas": 2, "data_mais_recente": null}"#,
        )?;
        assert_eq!(full.max_frp, Some(300.0));
        assert_eq!(full.total_biomes, Some(2));
        assert!(full.latest_detection.is_none());
        Ok(())
    }

    #[test]
    fn fire_record_tolerates_nulls_and_extra_columns() -> Result<(), serde_json::Error> {
        let records: Vec<FireRecord> = serde_json::from_str(
            r#"[{"municipio": null, "estado": "PARA", "bioma": "Amazonia",
                 "data_hora_gmt": "2025-11-02T17:40:00", "frp": null,
                 "satelite": "AQUA_M-T", "lat": -3.1}]"#,
        )?;
        assert_eq!(records[0].state.as_deref(), Some("PARA"));
        assert!(records[0].municipality.is_none());
        assert!(records[0].frp.is_none());
        Ok(())
    }
}
