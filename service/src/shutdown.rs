/*
	Copyright 2021 Integritee AG and Supercomputing Systems AG

	Licensed under the Apache License, Version 2.0 (the "License");
	you may not use this file except in compliance with the License.
	You may obtain a copy of the License at

		http://www.apache.org/licenses/LICENSE-2.0

	Unless required by applicable law or agreed to in writing, software
	distributed under the License is distributed on an "AS IS" BASIS,
	WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
	See the License for the specific language governing permissions and
	limitations under the License.

*/

use crate::error::ServiceResult;
use log::*;
use std::{
	cell::Cell,
	io,
	process,
	sync::mpsc::{channel, Receiver, RecvTimeoutError, Sender},
	thread,
	time::Duration,
};

/// 128 + SIGINT, as a shell reports a process killed by Ctrl-C
const FORCED_EXIT_CODE: i32 = 130;

/// Operator interrupt, as seen by the retry loops.
///
/// Waiting on the signal replaces a plain sleep, so an interrupt ends the wait right away.
pub struct ShutdownSignal {
	receiver: Receiver<()>,
	triggered: Cell<bool>,
}

impl ShutdownSignal {
	pub fn channel() -> (Sender<()>, ShutdownSignal) {
		let (sender, receiver) = channel();
		(sender, ShutdownSignal { receiver, triggered: Cell::new(false) })
	}

	/// Listens for Ctrl-C on a dedicated thread.
	///
	/// The first interrupt stops the retry loops, a second one terminates the process.
	pub fn install() -> ServiceResult<ShutdownSignal> {
		let (sender, signal) = Self::channel();
		let runtime = tokio::runtime::Builder::new_current_thread().enable_all().build()?;

		thread::Builder::new().name("shutdown_signal_listener".to_string()).spawn(move || {
			forward_interrupts(
				|| runtime.block_on(tokio::signal::ctrl_c()),
				sender,
				|| process::exit(FORCED_EXIT_CODE),
			)
		})?;

		Ok(signal)
	}

	/// Waits up to `timeout` and returns whether an interrupt has been received.
	///
	/// Without a listener the full `timeout` is slept.
	pub fn wait(&self, timeout: Duration) -> bool {
		if self.triggered.get() {
			return true
		}

		match self.receiver.recv_timeout(timeout) {
			Ok(()) => {
				self.triggered.set(true);
				true
			},
			Err(RecvTimeoutError::Timeout) => false,
			Err(RecvTimeoutError::Disconnected) => {
				thread::sleep(timeout);
				false
			},
		}
	}
}

/// Passes the first interrupt on to the service and calls `force_exit` on the second.
fn forward_interrupts<N, F>(mut next_interrupt: N, sender: Sender<()>, force_exit: F)
where
	N: FnMut() -> io::Result<()>,
	F: FnOnce(),
{
	if let Err(e) = next_interrupt() {
		error!("Unable to listen for the interrupt signal: {:?}", e);
		return
	}
	info!("Received interrupt signal, press Ctrl-C again to terminate");
	// the service may already be gone
	let _ = sender.send(());

	match next_interrupt() {
		Ok(()) => {
			warn!("Received second interrupt signal, terminating");
			force_exit();
		},
		Err(e) => error!("Unable to listen for the interrupt signal: {:?}", e),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::time::Instant;

	#[test]
	fn wait_times_out_without_interrupt() {
		let (_sender, signal) = ShutdownSignal::channel();

		assert!(!signal.wait(Duration::from_millis(10)));
	}

	#[test]
	fn interrupt_ends_the_wait_and_stays_triggered() {
		let (sender, signal) = ShutdownSignal::channel();
		sender.send(()).unwrap();

		let start = Instant::now();
		assert!(signal.wait(Duration::from_secs(60)));
		assert!(signal.wait(Duration::from_secs(60)));
		assert!(start.elapsed() < Duration::from_secs(60));
	}

	#[test]
	fn interrupt_from_another_thread_wakes_the_waiter() {
		let (sender, signal) = ShutdownSignal::channel();
		let notifier = thread::spawn(move || {
			thread::sleep(Duration::from_millis(20));
			sender.send(()).unwrap();
		});

		assert!(signal.wait(Duration::from_secs(60)));
		notifier.join().unwrap();
	}

	#[test]
	fn disconnected_listener_still_sleeps() {
		let (sender, signal) = ShutdownSignal::channel();
		drop(sender);

		let start = Instant::now();
		assert!(!signal.wait(Duration::from_millis(20)));
		assert!(start.elapsed() >= Duration::from_millis(20));
	}

	#[test]
	fn first_interrupt_is_forwarded_and_second_forces_exit() {
		let (sender, signal) = ShutdownSignal::channel();
		let mut interrupts = 0;
		let mut forced = false;

		forward_interrupts(
			|| {
				interrupts += 1;
				Ok(())
			},
			sender,
			|| forced = true,
		);

		assert_eq!(interrupts, 2);
		assert!(forced);
		assert!(signal.wait(Duration::from_secs(60)));
	}

	#[test]
	fn failing_listener_neither_forwards_nor_exits() {
		let (sender, signal) = ShutdownSignal::channel();
		let mut forced = false;

		forward_interrupts(
			|| Err(io::Error::new(io::ErrorKind::Other, "no signal support")),
			sender,
			|| forced = true,
		);

		assert!(!forced);
		assert!(!signal.wait(Duration::from_millis(10)));
	}
}
