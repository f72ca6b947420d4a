pub mod mode_adapter_factory;
