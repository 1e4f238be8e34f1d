use crate::error::{MalformedResponseSnafu, ParseDateSnafu, RosterResult};
use jiff::{Timestamp, civil, tz::TimeZone};
use maud::{Markup, html};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use snafu::ResultExt;

/// A student record as the backend speaks it. `id` is only present once
/// the backend has persisted the record.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Student {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub nom: String,
    pub prenom: String,
    #[serde(rename = "dateNaissance")]
    pub date_naissance: String,
}

impl Student {
    /// Date-of-birth cell for the listing table.
    ///
    /// Empty dates render as a placeholder dash and values the backend
    /// sends in a shape we cannot parse render verbatim.
    #[must_use]
    pub fn date_of_birth(&self) -> Markup {
        if self.date_naissance.is_empty() {
            return html! { p class="italic" {"-"} };
        }

        if let Ok(timestamp) = self.date_naissance.parse::<Timestamp>() {
            let date = timestamp.to_zoned(TimeZone::system()).date();
            return html! { (date.strftime("%d/%m/%Y")) };
        }
        if let Ok(date) = self.date_naissance.parse::<civil::Date>() {
            return html! { (date.strftime("%d/%m/%Y")) };
        }

        html! { (self.date_naissance) }
    }
}

/// The creation draft, straight from the urlencoded form.
#[derive(Deserialize, Debug, Clone)]
pub struct NewStudentForm {
    pub nom: String,
    pub prenom: String,
    pub date_naissance: String,
}

impl NewStudentForm {
    /// Convert the draft into the wire representation the backend
    /// expects, turning the typed `YYYY-MM-DD` into an ISO-8601 instant.
    pub fn into_wire(self) -> RosterResult<Student> {
        let date_naissance = to_wire_timestamp(&self.date_naissance)?;
        Ok(Student {
            id: None,
            nom: self.nom,
            prenom: self.prenom,
            date_naissance,
        })
    }
}

/// `YYYY-MM-DD` at literal local midnight, as an ISO-8601 UTC instant.
/// An empty date goes out as an empty string.
pub fn to_wire_timestamp(date: &str) -> RosterResult<String> {
    if date.is_empty() {
        return Ok(String::new());
    }

    let parsed: civil::Date = date.parse().context(ParseDateSnafu { original: date })?;
    let midnight = parsed
        .to_zoned(TimeZone::system())
        .context(ParseDateSnafu { original: date })?;
    Ok(midnight.timestamp().to_string())
}

/// Server-side aggregate: how many students were born in a given year.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct StudentByYear {
    pub year: i32,
    pub count: u64,
}

impl StudentByYear {
    /// Decode one element of the `byYear` payload.
    ///
    /// The backend has shipped three encodings over time: an ordered
    /// `[year, count]` pair, an object keyed `year`/`count`, and an
    /// object keyed `annee`/`total` (or abbreviated `y`/`c`). Keys are
    /// probed in that priority order; anything else is malformed.
    pub fn from_wire(value: &Value) -> RosterResult<Self> {
        match value {
            Value::Array(pair) if pair.len() >= 2 => {
                let year = pair[0].as_i64().and_then(|year| i32::try_from(year).ok());
                let count = pair[1].as_u64();
                if let (Some(year), Some(count)) = (year, count) {
                    return Ok(Self { year, count });
                }
            }
            Value::Object(object) => {
                let year = ["year", "annee", "y"]
                    .iter()
                    .find_map(|key| object.get(*key).and_then(Value::as_i64))
                    .and_then(|year| i32::try_from(year).ok());
                let count = ["count", "total", "c"]
                    .iter()
                    .find_map(|key| object.get(*key).and_then(Value::as_u64));
                if let (Some(year), Some(count)) = (year, count) {
                    return Ok(Self { year, count });
                }
            }
            _ => {}
        }

        MalformedResponseSnafu {
            value: value.to_string(),
        }
        .fail()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RosterError;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn by_year_decodes_ordered_pair() {
        let decoded = StudentByYear::from_wire(&json!([2001, 5])).unwrap();
        assert_eq!(
            decoded,
            StudentByYear {
                year: 2001,
                count: 5
            }
        );
    }

    #[test]
    fn by_year_decodes_year_count_object() {
        let decoded = StudentByYear::from_wire(&json!({"year": 2002, "count": 3})).unwrap();
        assert_eq!(
            decoded,
            StudentByYear {
                year: 2002,
                count: 3
            }
        );
    }

    #[test]
    fn by_year_decodes_alternate_keys() {
        let decoded = StudentByYear::from_wire(&json!({"annee": 2003, "total": 7})).unwrap();
        assert_eq!(
            decoded,
            StudentByYear {
                year: 2003,
                count: 7
            }
        );
    }

    #[test]
    fn by_year_decodes_abbreviated_keys() {
        let decoded = StudentByYear::from_wire(&json!({"y": 2004, "c": 1})).unwrap();
        assert_eq!(
            decoded,
            StudentByYear {
                year: 2004,
                count: 1
            }
        );
    }

    #[test]
    fn by_year_prefers_canonical_keys() {
        let decoded =
            StudentByYear::from_wire(&json!({"year": 2001, "annee": 1901, "count": 5, "total": 99}))
                .unwrap();
        assert_eq!(
            decoded,
            StudentByYear {
                year: 2001,
                count: 5
            }
        );
    }

    #[test]
    fn by_year_rejects_unknown_object() {
        let error = StudentByYear::from_wire(&json!({"foo": 1})).unwrap_err();
        assert!(matches!(error, RosterError::MalformedResponse { .. }));
    }

    #[test]
    fn by_year_rejects_non_numeric_pair() {
        let error = StudentByYear::from_wire(&json!(["2001", "5"])).unwrap_err();
        assert!(matches!(error, RosterError::MalformedResponse { .. }));
    }

    #[test]
    fn by_year_rejects_short_array() {
        let error = StudentByYear::from_wire(&json!([2001])).unwrap_err();
        assert!(matches!(error, RosterError::MalformedResponse { .. }));
    }

    #[test]
    fn wire_timestamp_is_local_midnight_as_utc_instant() {
        let wire = to_wire_timestamp("2001-05-12").unwrap();

        let instant: Timestamp = wire.parse().unwrap();
        let round_tripped = instant.to_zoned(TimeZone::system());
        assert_eq!(round_tripped.date(), civil::date(2001, 5, 12));
        assert_eq!(round_tripped.time(), civil::time(0, 0, 0, 0));
    }

    #[test]
    fn wire_timestamp_passes_empty_through() {
        assert_eq!(to_wire_timestamp("").unwrap(), "");
    }

    #[test]
    fn wire_timestamp_rejects_garbage() {
        let error = to_wire_timestamp("12/05/2001").unwrap_err();
        assert!(matches!(error, RosterError::ParseDate { .. }));
    }

    fn student_with_date(date_naissance: &str) -> Student {
        Student {
            id: Some(1),
            nom: "Doe".to_string(),
            prenom: "Jane".to_string(),
            date_naissance: date_naissance.to_string(),
        }
    }

    #[test]
    fn missing_date_renders_placeholder() {
        let markup = student_with_date("").date_of_birth().into_string();
        assert!(markup.contains('-'));
        assert!(markup.contains("italic"));
    }

    #[test]
    fn unparseable_date_renders_verbatim() {
        let markup = student_with_date("not-a-date").date_of_birth().into_string();
        assert_eq!(markup, "not-a-date");
    }

    #[test]
    fn timestamp_date_renders_short_form() {
        let wire = to_wire_timestamp("2001-05-12").unwrap();
        let markup = student_with_date(&wire).date_of_birth().into_string();
        assert_eq!(markup, "12/05/2001");
    }

    #[test]
    fn student_serialises_with_wire_field_names() {
        let form = NewStudentForm {
            nom: "Doe".to_string(),
            prenom: "Jane".to_string(),
            date_naissance: String::new(),
        };
        let wire = serde_json::to_value(form.into_wire().unwrap()).unwrap();
        assert_eq!(wire, json!({"nom": "Doe", "prenom": "Jane", "dateNaissance": ""}));
    }
}
