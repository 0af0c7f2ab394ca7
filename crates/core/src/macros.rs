// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Tessera Contributors

/// Runs `$body` against the typed segment inside a per-type segment enum.
macro_rules! with_typed {
	($enum:ident, $value:expr, $inner:ident => $body:expr) => {
		match $value {
			$enum::Int4($inner) => $body,
			$enum::Int8($inner) => $body,
			$enum::Float4($inner) => $body,
			$enum::Float8($inner) => $body,
			$enum::Utf8($inner) => $body,
		}
	};
}
