/// Settings the plant and the menu need, whatever their source.
pub trait ConfigProvider {
    fn box_capacity(&self) -> usize;
    fn export_path(&self) -> Option<&str>;
    fn json_logs(&self) -> bool;
}
