//! Remote field → sheet column rename table.
//!
//! Applied verbatim to every fetched record. Order matters: on a first-time
//! load the sheet header is laid out in table order, so extending the schema
//! means appending a pair here.

/// Remote field name → persisted column name.
pub const FIELD_RENAMES: &[(&str, &str)] = &[
    ("Name", "incident_name"),
    ("Final", "incident_is_final"),
    ("Updated", "incident_date_last_update"),
    ("Started", "incident_date_created"),
    ("AdminUnit", "incident_administrative_unit"),
    ("AdminUnitUrl", "incident_administrative_unit_url"),
    ("County", "incident_county"),
    ("Location", "incident_location"),
    ("AcresBurned", "incident_acres_burned"),
    ("PercentContained", "incident_containment"),
    ("ControlStatement", "incident_control_statement"),
    ("AgencyNames", "incident_agency_names"),
    ("Longitude", "incident_longitude"),
    ("Latitude", "incident_latitude"),
    ("Type", "incident_type"),
    ("UniqueId", "incident_id"),
    ("Url", "incident_url"),
    ("ExtinguishedDate", "incident_date_extinguished"),
    ("ExtinguishedDateOnly", "incident_dateonly_extinguished"),
    ("StartedDateOnly", "incident_dateonly_created"),
    ("IsActive", "is_active"),
    ("CalFireIncident", "calfire_incident"),
    ("NotificationDesired", "notification_desired"),
];

/// Map a remote field name to its sheet column name.
///
/// Unmapped fields keep their remote name; they are dropped later by column
/// alignment rather than here.
pub fn rename_field(remote: &str) -> &str {
    for (from, to) in FIELD_RENAMES {
        if *from == remote {
            return to;
        }
    }
    remote
}
