//! Interactive prompts for values left off the command line.
//!
//! Each prompt repeats until it gets an acceptable answer. End of input is an
//! error rather than a silent default.

use std::io::{self, BufRead, Write};

use cachesim_core::config::CacheConfig;
use cachesim_core::common::error::{ConfigError, LoadError};
use cachesim_core::sim::{ProgramImage, load_program};

/// Reads answers from `input` and writes questions to `output`.
#[derive(Debug)]
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    /// Wraps an input and an output stream.
    pub const fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Asks for a program file until one can be opened.
    pub fn program(&mut self) -> io::Result<ProgramImage> {
        self.ask("\nEnter the machine code program to simulate: ")?;
        loop {
            let line = self.read_line()?;
            match load_program(line.trim()) {
                Ok(image) => return Ok(image),
                Err(LoadError::Io { .. }) => {
                    self.ask("The file you entered does not exist. Please enter another one: ")?;
                }
                Err(e) => return Err(io::Error::new(io::ErrorKind::InvalidData, e)),
            }
        }
    }

    /// Asks for the block size in words.
    pub fn block_size(&mut self) -> io::Result<usize> {
        self.ask("\nEnter the block size of the cache (in words): ")?;
        self.read_valid(CacheConfig::check_block_size, |e| match e {
            ConfigError::BlockSizeNotPowerOfTwo(_) => {
                "\nThe block size you entered is not a power of two. Please enter again: "
            }
            _ => "\nThe block size you entered is not within the parameters (1-256). Please enter again: ",
        })
    }

    /// Asks for the number of sets.
    pub fn num_sets(&mut self) -> io::Result<usize> {
        self.ask("\nEnter the number of sets in the cache (1 or greater): ")?;
        self.read_valid(CacheConfig::check_num_sets, |_| {
            "\nThe number you entered is not a power of two (1 or greater). Please enter again: "
        })
    }

    /// Asks for the associativity.
    pub fn associativity(&mut self) -> io::Result<usize> {
        self.ask("\nEnter the associativity of the cache (1 or greater): ")?;
        self.read_valid(CacheConfig::check_associativity, |_| {
            "\nThe number you entered is not in the range (1 or greater). Please enter again: "
        })
    }

    /// Reads numbers until `check` accepts one. Unparsable input counts as zero.
    fn read_valid(
        &mut self,
        check: fn(usize) -> Result<(), ConfigError>,
        retry: fn(&ConfigError) -> &'static str,
    ) -> io::Result<usize> {
        loop {
            let value = self.read_line()?.trim().parse().unwrap_or(0);
            match check(value) {
                Ok(()) => return Ok(value),
                Err(e) => self.ask(retry(&e))?,
            }
        }
    }

    fn ask(&mut self, question: &str) -> io::Result<()> {
        write!(self.output, "{question}")?;
        self.output.flush()
    }

    fn read_line(&mut self) -> io::Result<String> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "unexpected end of input",
            ));
        }
        Ok(line)
    }
}
