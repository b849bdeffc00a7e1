use anyhow::Result;

fn main() -> Result<()> {
    mesh_doctor_cli::main_entry()
}
