//! Shared test utilities for pe-session unit tests.
