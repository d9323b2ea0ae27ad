//! Context integration tests: derived property tables, transparency of
//! typed fields through the map, and the attribute-scope views.
