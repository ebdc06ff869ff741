// Crate entry point. Re-export modules so tests and consumers can import them easily.
//
// Responsibilities
// - Only declare and expose modules. No storage logic here.
//
// How it is used
// - Applications construct a TransactionalStore implementation, hand it to a
//   StreamRegistry and a ViewCache at their composition root, and work with
//   EventStream handles from there.

pub mod core {
    pub mod event;
    pub mod namespace;
    pub mod ports;
    pub mod view;
}

pub mod application {
    pub mod event_stream;
    pub mod stream_registry;
    pub mod view_cache;
}

pub mod adapters {
    pub mod in_memory {
        pub mod in_memory_store;
    }
}
