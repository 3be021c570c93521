// BFGMiner Monitor - Free and Open Source Software Statement
//
// This project, bfgminer-monitor, is Free and Open Source Software (FOSS) licensed
// under the MIT License. You are free to use, modify, and distribute this
// software in accordance with the license terms. Contributions are welcome
// via pull requests to the project repository.
//
// File: src/utils/mod.rs
// Version: 1.0.0
// Developer: OIEIEIO <oieieio@protonmail.com>
//
// This file is the module declaration for utility functions, located in the
// utils subdirectory.
//
// Tree Location:
// - src/utils/mod.rs (utils module entry point)
// - Submodules: format

pub mod format;

pub use format::FormatUtils;
