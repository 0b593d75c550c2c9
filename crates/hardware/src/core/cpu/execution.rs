//! Main Execution Loop.
//!
//! This module implements the instruction cycle of the CPU. Each step:
//! 1. **Fetch:** Reads the word at `pc` through the cache.
//! 2. **Decode:** Rejects opcodes outside the instruction set; `halt` stops here.
//! 3. **Execute:** Advances `pc`, then applies the instruction. Loads and stores
//!    go through the cache; arithmetic wraps on overflow.

use tracing::{debug, trace};

use super::{Cpu, CpuState, StepOutcome};
use crate::common::addr::WordAddr;
use crate::common::error::ExecError;
use crate::core::units::cache::{Cache, Request};
use crate::isa::disasm::disassemble;
use crate::isa::{Instruction, InstructionBits, decode};
use crate::trace::TraceSink;

impl Cpu {
    /// Executes one instruction.
    ///
    /// A halted processor does nothing and reports [`StepOutcome::Halted`].
    ///
    /// # Errors
    ///
    /// Returns [`ExecError::FatalDecode`] for an undefined opcode and
    /// [`ExecError::AddressOutOfRange`] when the pc or an effective address
    /// falls outside main memory. The processor state is left as it was at
    /// the point of failure.
    pub fn step<S: TraceSink>(&mut self, cache: &mut Cache<S>) -> Result<StepOutcome, ExecError> {
        if self.is_halted() {
            return Ok(StepOutcome::Halted);
        }

        let pc = self.pc;
        let word = self.access(cache, pc, Request::Fetch)?;
        let inst = decode(word).ok_or(ExecError::FatalDecode {
            pc,
            word,
            opcode: word.opcode(),
        })?;
        self.stats.record_instruction(&inst);

        trace!(pc, word, "{}", disassemble(word));

        if inst == Instruction::Halt {
            self.state = CpuState::Halted;
            debug!(pc, instructions = self.stats.instructions, "machine halted");
            return Ok(StepOutcome::Halted);
        }

        self.pc = pc.wrapping_add(1);
        self.execute(cache, inst)?;
        Ok(StepOutcome::Executed(inst))
    }

    fn execute<S: TraceSink>(
        &mut self,
        cache: &mut Cache<S>,
        inst: Instruction,
    ) -> Result<(), ExecError> {
        match inst {
            Instruction::Add { a, b, dest } => {
                let sum = self.regs.read(a).wrapping_add(self.regs.read(b));
                self.regs.write(dest, sum);
            }
            Instruction::Nand { a, b, dest } => {
                let nand = !(self.regs.read(a) & self.regs.read(b));
                self.regs.write(dest, nand);
            }
            Instruction::Lw { a, b, offset } => {
                let addr = self.regs.read(b).wrapping_add(offset);
                let value = self.access(cache, addr, Request::Load)?;
                self.regs.write(a, value);
            }
            Instruction::Sw { a, b, offset } => {
                let addr = self.regs.read(b).wrapping_add(offset);
                let value = self.regs.read(a);
                let _ = self.access(cache, addr, Request::Store(value))?;
            }
            Instruction::Beq { a, b, offset } => {
                if self.regs.read(a) == self.regs.read(b) {
                    self.pc = self.pc.wrapping_add(offset);
                    self.stats.branches_taken += 1;
                }
            }
            Instruction::Jalr { a, b } => {
                // Link first: with a == b the jump lands on the return address.
                self.regs.write(a, self.pc);
                self.pc = self.regs.read(b);
            }
            Instruction::Noop | Instruction::Halt => {}
        }
        Ok(())
    }

    /// Issues one request at register value `addr` and accounts for it.
    fn access<S: TraceSink>(
        &mut self,
        cache: &mut Cache<S>,
        addr: i32,
        request: Request,
    ) -> Result<i32, ExecError> {
        let kind = request.kind();
        let addr = WordAddr::from_register(addr, kind)?;
        let access = cache.access(addr, request)?;
        self.stats.record_access(kind, &access);
        Ok(access.value)
    }
}
