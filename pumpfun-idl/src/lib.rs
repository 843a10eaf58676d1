//! Account layouts, seeds and PDA helpers for the bonding-curve launchpad
//! program.
//!
//! Only the read side of the program is described here. Instruction
//! builders live with whichever client submits transactions.

#![allow(clippy::pub_underscore_fields)]

extern crate anchor_lang;

use anchor_lang::prelude::*;

declare_id!("6GoM9tG1YyM5Uzyh3oRkG6A8WwxELU2NGjEQmTbiccyA");

pub mod accounts;
pub mod constants;
pub mod pda;
pub mod tokens;
