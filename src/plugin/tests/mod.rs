//! Unit tests for the plugin entry surface.
