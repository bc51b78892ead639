/// WGSL shader for textured, normal-mapped meshes.
///
/// Bind groups: 0 = scene block + sampler, 1 = material textures,
/// 2 = world matrix (dynamic offset).
pub const VIEWER_SHADER: &str = r#"
struct Scene {
    view_proj: mat4x4<f32>,
    camera_position: vec3<f32>,
    light_direction: vec3<f32>,
};

struct Model {
    world: mat4x4<f32>,
};

@group(0) @binding(0)
var<uniform> scene: Scene;
@group(0) @binding(1)
var texture_sampler: sampler;

@group(1) @binding(0)
var diffuse_texture: texture_2d<f32>;
@group(1) @binding(1)
var normal_texture: texture_2d<f32>;

@group(2) @binding(0)
var<uniform> model: Model;

struct VertexInput {
    @location(0) position: vec3<f32>,
    @location(1) normal: vec3<f32>,
    @location(2) tangent: vec3<f32>,
    @location(3) uv: vec2<f32>,
};

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) world_position: vec3<f32>,
    @location(1) normal: vec3<f32>,
    @location(2) tangent: vec3<f32>,
    @location(3) uv: vec2<f32>,
};

@vertex
fn vs_main(vertex: VertexInput) -> VertexOutput {
    let world_position = model.world * vec4<f32>(vertex.position, 1.0);

    var out: VertexOutput;
    out.clip_position = scene.view_proj * world_position;
    out.world_position = world_position.xyz;
    out.normal = (model.world * vec4<f32>(vertex.normal, 0.0)).xyz;
    out.tangent = (model.world * vec4<f32>(vertex.tangent, 0.0)).xyz;
    out.uv = vertex.uv;
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    let diffuse = textureSample(diffuse_texture, texture_sampler, in.uv);

    let n = normalize(in.normal);
    let t = normalize(in.tangent - n * dot(in.tangent, n));
    let b = cross(n, t);
    let sampled = textureSample(normal_texture, texture_sampler, in.uv).xyz * 2.0 - 1.0;
    let normal = normalize(mat3x3<f32>(t, b, n) * sampled);

    let to_light = -scene.light_direction;
    let to_camera = normalize(scene.camera_position - in.world_position);
    let half_vector = normalize(to_light + to_camera);

    let ambient = 0.1;
    let lambert = max(dot(normal, to_light), 0.0);
    let specular = pow(max(dot(normal, half_vector), 0.0), 32.0) * 0.5;
    return vec4<f32>(diffuse.rgb * (ambient + lambert) + vec3<f32>(specular), diffuse.a);
}
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_points_and_bind_groups() {
        assert!(VIEWER_SHADER.contains("fn vs_main("));
        assert!(VIEWER_SHADER.contains("fn fs_main("));
        for group in ["@group(0) @binding(0)", "@group(1) @binding(1)", "@group(2) @binding(0)"] {
            assert!(VIEWER_SHADER.contains(group), "missing {group}");
        }
    }
}
