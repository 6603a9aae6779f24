#![allow(dead_code, unused_imports)]

pub use gha2argo_test_utils::builders;
pub use gha2argo_test_utils::gated_backend;
pub use gha2argo_test_utils::{init_tracing, with_timeout};

/// The `test` + `build` workflow used across the integration tests.
pub const TEST_BUILD_WORKFLOW: &str = r#"
name: CI Pipeline
on: [push]
jobs:
  test:
    runs-on: ubuntu-latest
    steps:
      - name: Checkout
        uses: actions/checkout@v4
      - name: Run tests
        run: make test
  build:
    runs-on: ubuntu-22.04
    needs: test
    steps:
      - name: Build
        run: |
          make build
          echo done
"#;
