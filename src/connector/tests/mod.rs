//! Unit tests for the connector domain.
