use crate::core::resource::LockResource;
use crate::core::types::HoldStrategy;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// One entry in a worker's acquisition script
///
/// The script is data, not code layout: a scenario decides the acquisition
/// order by building a list of steps, and every worker executes its list the
/// same way.
pub enum Step {
    /// Announce the wait, block until held, announce the acquisition
    Acquire(Arc<LockResource>),
    /// Contend for the resource but stay silent once it is obtained
    Contend(Arc<LockResource>),
    /// Sleep while keeping everything acquired so far
    Pause(Duration),
}

/// What a worker does with its resources once the script is done
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleasePolicy {
    /// Release in strict reverse-acquisition order, then terminate
    ReleaseAfterScript,
    /// Keep every acquired resource forever, occupying the thread per the
    /// given strategy
    NeverRelease(HoldStrategy),
}

/// A unit of concurrent execution with a scripted lock-acquisition order
///
/// A worker is an identity, an ordered script of [`Step`]s, and a
/// [`ReleasePolicy`]. It either runs on a freshly spawned thread
/// ([`spawn`](Worker::spawn)) or takes over the calling thread
/// ([`run`](Worker::run)) — which is how a scenario's own thread becomes one
/// of the contenders.
///
/// # Example
///
/// ```rust
/// use gridlock::{LockResource, Worker};
/// use std::sync::Arc;
///
/// let desk = Arc::new(LockResource::new("front-desk"));
/// let clerk = Worker::new("Clerk")
///     .acquire(&desk)
///     .spawn();
/// clerk.join().unwrap();
/// ```
pub struct Worker {
    /// Identity used in trace output
    name: String,
    /// Ordered acquisition script
    script: Vec<Step>,
    /// What happens after the final step
    policy: ReleasePolicy,
}

impl Worker {
    /// Create a worker with an empty script and a release-after-script policy
    pub fn new(name: impl Into<String>) -> Self {
        Worker {
            name: name.into(),
            script: Vec::new(),
            policy: ReleasePolicy::ReleaseAfterScript,
        }
    }

    /// Append an announced acquisition of `resource` to the script
    pub fn acquire(mut self, resource: &Arc<LockResource>) -> Self {
        self.script.push(Step::Acquire(Arc::clone(resource)));
        self
    }

    /// Append a quiet acquisition: the wait is announced, success is not
    pub fn contend(mut self, resource: &Arc<LockResource>) -> Self {
        self.script.push(Step::Contend(Arc::clone(resource)));
        self
    }

    /// Append a sleep; everything acquired so far stays held throughout
    pub fn pause(mut self, delay: Duration) -> Self {
        self.script.push(Step::Pause(delay));
        self
    }

    /// Never release anything: after the last step the worker holds all its
    /// resources forever, occupying its thread per `hold`
    pub fn never_release(mut self, hold: HoldStrategy) -> Self {
        self.policy = ReleasePolicy::NeverRelease(hold);
        self
    }

    /// Get the worker's name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Start the worker on a new thread named after it
    ///
    /// The worker begins executing its script immediately. The returned
    /// handle can be joined, but nothing joins it implicitly: a worker that
    /// never finishes simply keeps its thread.
    ///
    /// # Panics
    ///
    /// Panics if the OS fails to create a thread.
    pub fn spawn(self) -> WorkerHandle {
        let name = self.name.clone();
        let handle = thread::Builder::new()
            .name(name.clone())
            .spawn(move || self.run())
            .unwrap();

        WorkerHandle { name, handle }
    }

    /// Execute the script on the calling thread
    ///
    /// Returns only if the policy is [`ReleasePolicy::ReleaseAfterScript`];
    /// a never-release worker keeps the calling thread forever.
    pub fn run(self) {
        let Worker {
            name,
            script,
            policy,
        } = self;

        let mut guards = Vec::with_capacity(script.len());
        for step in &script {
            match step {
                Step::Acquire(resource) => guards.push(resource.acquire(&name)),
                Step::Contend(resource) => guards.push(resource.acquire_quiet(&name)),
                Step::Pause(delay) => thread::sleep(*delay),
            }
        }

        match policy {
            ReleasePolicy::NeverRelease(hold) => hold_forever(hold),
            ReleasePolicy::ReleaseAfterScript => {
                // Strict reverse-acquisition order
                for guard in guards.into_iter().rev() {
                    drop(guard);
                }
            }
        }
    }
}

/// Keep the current thread occupied forever while its guards stay live
fn hold_forever(hold: HoldStrategy) -> ! {
    match hold {
        HoldStrategy::Spin => loop {
            std::hint::spin_loop();
        },
        HoldStrategy::Park => loop {
            // park() can wake spuriously; nothing ever unparks us on purpose
            thread::park();
        },
    }
}

/// Handle to a spawned worker's thread
pub struct WorkerHandle {
    name: String,
    handle: JoinHandle<()>,
}

impl WorkerHandle {
    /// Get the name of the worker this handle belongs to
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Wait for the worker to finish
    ///
    /// Blocks forever if the worker never does.
    pub fn join(self) -> thread::Result<()> {
        self.handle.join()
    }
}

/// Block until every given worker has finished
///
/// This is the explicit wait-for-all-completions primitive. Scenarios that
/// want their own termination tied to their workers call it; the others
/// deliberately do not.
pub fn wait_for_all(workers: Vec<WorkerHandle>) {
    for worker in workers {
        let _ = worker.join();
    }
}
