// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Host data adapters for third-party value types.

/// `serde_json::Value` as template data.
#[cfg(feature = "json")]
pub mod json;
