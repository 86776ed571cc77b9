use std::ops::{BitOr, BitOrAssign};
use std::process::ExitCode;

/// Accumulated outcome of processing one or more targets.
///
/// Once a failure has been recorded the status stays `Failed`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Status {
	#[default]
	Clean,
	Failed,
}

impl Status {
	pub fn is_failed(self) -> bool {
		self == Status::Failed
	}

	/// Process exit code for this status.
	pub fn code(self) -> u8 {
		match self {
			Status::Clean => 0,
			Status::Failed => 1,
		}
	}
}

impl BitOr for Status {
	type Output = Status;

	fn bitor(self, rhs: Status) -> Status {
		if self.is_failed() || rhs.is_failed() {
			Status::Failed
		} else {
			Status::Clean
		}
	}
}

impl BitOrAssign for Status {
	fn bitor_assign(&mut self, rhs: Status) {
		*self = *self | rhs;
	}
}

impl From<Status> for ExitCode {
	fn from(status: Status) -> ExitCode {
		ExitCode::from(status.code())
	}
}
