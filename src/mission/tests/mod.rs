//! Unit tests for missions and the pipeline orchestrator.
