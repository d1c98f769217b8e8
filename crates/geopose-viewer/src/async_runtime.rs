//! Spawning of background tasks on native and WASM.
//!
//! reqwest needs a Tokio runtime on native, which `bevy_tokio_tasks` provides.
//! In the browser reqwest uses fetch, and Bevy's `AsyncComputeTaskPool` is
//! enough to drive it.

use bevy::prelude::*;

/// Adds the Tokio runtime on native; nothing on WASM.
pub struct AsyncRuntimePlugin;

impl Plugin for AsyncRuntimePlugin {
    fn build(&self, app: &mut App) {
        #[cfg(target_family = "wasm")]
        let _ = app;

        #[cfg(not(target_family = "wasm"))]
        app.add_plugins(bevy_tokio_tasks::TokioTasksPlugin::default());
    }
}

#[cfg(not(target_family = "wasm"))]
mod native {
    use std::future::Future;

    use bevy::{ecs::system::SystemParam, prelude::*};

    /// Spawns fire-and-forget tasks on the Tokio runtime.
    #[derive(SystemParam)]
    pub struct TaskSpawner<'w, 's> {
        runtime: Res<'w, bevy_tokio_tasks::TokioTasksRuntime>,
        // Keeps the lifetimes identical to the WASM variant.
        _local: Local<'s, ()>,
    }

    impl TaskSpawner<'_, '_> {
        /// Run `future` to completion in the background.
        ///
        /// Results travel back to systems over a channel.
        pub fn spawn<F>(&self, future: F)
        where
            F: Future<Output = ()> + Send + 'static,
        {
            self.runtime.spawn_background_task(move |_ctx| future);
        }
    }
}

#[cfg(target_family = "wasm")]
mod wasm {
    use std::future::Future;

    use bevy::{ecs::system::SystemParam, prelude::*, tasks::AsyncComputeTaskPool};

    /// Spawns fire-and-forget tasks on Bevy's async compute pool.
    #[derive(SystemParam)]
    pub struct TaskSpawner<'w, 's> {
        _local: Local<'s, ()>,
        _marker: std::marker::PhantomData<&'w ()>,
    }

    impl TaskSpawner<'_, '_> {
        /// Run `future` to completion in the background.
        ///
        /// The browser is single-threaded, so `Send` is not required.
        pub fn spawn<F>(&self, future: F)
        where
            F: Future<Output = ()> + 'static,
        {
            AsyncComputeTaskPool::get().spawn_local(future).detach();
        }
    }
}

#[cfg(not(target_family = "wasm"))]
pub use native::TaskSpawner;
#[cfg(target_family = "wasm")]
pub use wasm::TaskSpawner;
